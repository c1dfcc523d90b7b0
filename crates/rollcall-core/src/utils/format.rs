use chrono::NaiveDate;

use crate::error::{AttendanceError, Result};

/// Display format for dates in log lines and reports
const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Format a percentage with one decimal place, e.g. `80.0%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a date as DD-MM-YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Format a date with its weekday, e.g. `Monday, 04-03-2024`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A, %d-%m-%Y").to_string()
}

/// Parse a date typed by a user.
/// Accepts ISO `YYYY-MM-DD` or the display format `DD-MM-YYYY`.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AttendanceError::validation("Date cannot be null"));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, DISPLAY_DATE_FORMAT))
        .map_err(|_| AttendanceError::validation(format!("Invalid date: {}", text)))
}

/// A horizontal rule of `width` copies of `ch`
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}
