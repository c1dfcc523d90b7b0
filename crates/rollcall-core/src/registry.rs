use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::calendar;
use crate::config::Config;
use crate::error::{AttendanceError, Result};
use crate::models::{Notification, Person};
use crate::utils::{format_date, parse_date};

/// Result of marking several people for the same date.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    pub successful: usize,
    pub failed: Vec<(String, AttendanceError)>,
}

/// Keyed collection of every person known to one institution.
///
/// Persons are kept in id order, so listings and reports are deterministic.
pub struct Registry {
    config: Config,
    persons: BTreeMap<String, Person>,
    school_days: Vec<NaiveDate>,
    total_registered: usize,
}

impl Registry {
    /// Create a registry whose school-day window ends around today.
    pub fn new(config: Config) -> Self {
        let school_days = calendar::school_days(config.school_day_count);
        Self::with_school_days(config, school_days)
    }

    pub fn with_school_days(config: Config, school_days: Vec<NaiveDate>) -> Self {
        debug!(
            institution = %config.institution_name,
            days = school_days.len(),
            "Registry created"
        );
        Self {
            config,
            persons: BTreeMap::new(),
            school_days,
            total_registered: 0,
        }
    }

    pub fn institution_name(&self) -> &str {
        &self.config.institution_name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add a person. Duplicate ids are rejected and leave the registry unchanged.
    pub fn register(&mut self, mut person: Person) -> Result<()> {
        if self.persons.contains_key(person.id()) {
            warn!(id = %person.id(), "Registration failed: duplicate ID");
            return Err(AttendanceError::DuplicateId(person.id().to_string()));
        }

        person.apply_policy(self.config.policy_for(person.role()));
        info!(
            role = %person.role(),
            name = %person.name(),
            id = %person.id(),
            "Registered successfully"
        );
        self.persons.insert(person.id().to_string(), person);
        self.total_registered += 1;
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Person> {
        self.persons.get_mut(id)
    }

    pub fn mark_attendance(
        &mut self,
        id: &str,
        date: NaiveDate,
        present: bool,
    ) -> Result<Option<Notification>> {
        let person = self
            .persons
            .get_mut(id)
            .ok_or_else(|| AttendanceError::NotFound(id.to_string()))?;
        Ok(person.record_attendance(date, present))
    }

    /// Like `mark_attendance`, for a date typed by a user.
    /// A blank or malformed date fails validation before any lookup.
    pub fn mark_attendance_str(
        &mut self,
        id: &str,
        date: &str,
        present: bool,
    ) -> Result<Option<Notification>> {
        let date = parse_date(date)?;
        self.mark_attendance(id, date, present)
    }

    /// Mark every id for one date. Each id is independent of the others.
    pub fn bulk_mark_attendance<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        date: NaiveDate,
        present: bool,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for id in ids {
            let id = id.as_ref();
            match self.mark_attendance(id, date, present) {
                Ok(_) => outcome.successful += 1,
                Err(e) => {
                    warn!(id = %id, error = %e, "Attendance marking failed");
                    outcome.failed.push((id.to_string(), e));
                }
            }
        }
        info!(
            date = %format_date(date),
            successful = outcome.successful,
            failed = outcome.failed.len(),
            "Bulk attendance complete"
        );
        outcome
    }

    /// Persons in id order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn persons_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.persons.values_mut()
    }

    pub fn school_days(&self) -> &[NaiveDate] {
        &self.school_days
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Successful registrations over this registry's lifetime.
    pub fn total_registered(&self) -> usize {
        self.total_registered
    }
}
