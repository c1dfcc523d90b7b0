//! School-day window generation.
//!
//! The tracking window is a fixed run of business days. Generation starts
//! `count` calendar days before today and walks forward one day at a time,
//! keeping Monday through Friday until `count` days are collected.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Whether a date is a business day (Monday to Friday)
pub fn is_school_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// School days for a window anchored at `today`.
pub fn school_days_from(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = today
        .checked_sub_days(Days::new(count as u64))
        .unwrap_or(today);

    while days.len() < count {
        if is_school_day(current) {
            days.push(current);
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// School days for a window anchored at the local current date.
pub fn school_days(count: usize) -> Vec<NaiveDate> {
    school_days_from(Local::now().date_naive(), count)
}
