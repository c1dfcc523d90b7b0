use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RolePolicy;
use crate::error::{require_non_blank, Result};
use crate::models::profile::{PersonProfile, RoleDetails};
use crate::models::student::StudentProfile;
use crate::models::teacher::TeacherProfile;
use crate::utils::format_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Teacher,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Teacher => write!(f, "Teacher"),
        }
    }
}

/// A simulated notification sent when someone is marked absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    ParentContacted { student: String },
    SubstituteArranged { subject: String },
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::ParentContacted { student } => {
                write!(f, "Automated parent notification sent for {}", student)
            }
            Notification::SubstituteArranged { subject } => {
                write!(f, "Substitute arrangement initiated for {} class", subject)
            }
        }
    }
}

/// Outcome of one low-attendance escalation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Escalation {
    pub count: u32,
    pub headline: String,
    pub actions: Vec<String>,
    pub critical: bool,
}

impl std::fmt::Display for Escalation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.headline)?;
        for action in &self.actions {
            writeln!(f, "   - {}", action)?;
        }
        Ok(())
    }
}

/// Behavior that differs between roles.
pub trait RoleBehavior {
    fn role(&self) -> Role;

    /// Build the escalation for the given (already incremented) count.
    fn escalation(&self, count: u32, policy: &RolePolicy) -> Escalation;

    fn absence_notification(&self, name: &str) -> Notification;

    fn details(&self, escalation_count: u32) -> RoleDetails;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersonKind {
    Student(StudentProfile),
    Teacher(TeacherProfile),
}

impl PersonKind {
    pub fn behavior(&self) -> &dyn RoleBehavior {
        match self {
            PersonKind::Student(s) => s,
            PersonKind::Teacher(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    id: String,
    name: String,
    ledger: BTreeMap<NaiveDate, bool>,
    escalation_count: u32,
    policy: RolePolicy,
    kind: PersonKind,
}

impl Person {
    fn new(name: &str, id: &str, kind: PersonKind) -> Result<Self> {
        let name = require_non_blank(name, "Name")?;
        let id = require_non_blank(id, "ID")?;
        let policy = RolePolicy::default_for(kind.behavior().role());
        Ok(Self {
            id,
            name,
            ledger: BTreeMap::new(),
            escalation_count: 0,
            policy,
            kind,
        })
    }

    pub fn student(name: &str, id: &str, grade_level: &str, gpa: f64) -> Result<Self> {
        let profile = StudentProfile::new(grade_level, gpa)?;
        Self::new(name, id, PersonKind::Student(profile))
    }

    pub fn teacher(
        name: &str,
        id: &str,
        subject: &str,
        years_experience: u32,
        salary: f64,
    ) -> Result<Self> {
        let profile = TeacherProfile::new(subject, years_experience, salary)?;
        Self::new(name, id, PersonKind::Teacher(profile))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.kind.behavior().role()
    }

    pub fn kind(&self) -> &PersonKind {
        &self.kind
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match &self.kind {
            PersonKind::Student(s) => Some(s),
            PersonKind::Teacher(_) => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut StudentProfile> {
        match &mut self.kind {
            PersonKind::Student(s) => Some(s),
            PersonKind::Teacher(_) => None,
        }
    }

    pub fn as_teacher(&self) -> Option<&TeacherProfile> {
        match &self.kind {
            PersonKind::Teacher(t) => Some(t),
            PersonKind::Student(_) => None,
        }
    }

    pub fn as_teacher_mut(&mut self) -> Option<&mut TeacherProfile> {
        match &mut self.kind {
            PersonKind::Teacher(t) => Some(t),
            PersonKind::Student(_) => None,
        }
    }

    /// Read-only view of the ledger, ordered by date.
    pub fn ledger(&self) -> &BTreeMap<NaiveDate, bool> {
        &self.ledger
    }

    pub fn attendance_on(&self, date: NaiveDate) -> Option<bool> {
        self.ledger.get(&date).copied()
    }

    pub fn escalation_count(&self) -> u32 {
        self.escalation_count
    }

    pub fn policy(&self) -> RolePolicy {
        self.policy
    }

    pub(crate) fn apply_policy(&mut self, policy: RolePolicy) {
        self.policy = policy;
    }

    pub fn minimum_requirement(&self) -> f64 {
        self.policy.minimum_requirement_pct
    }

    /// Set presence for a date. Re-marking a date overwrites the earlier entry.
    pub fn record_attendance(&mut self, date: NaiveDate, present: bool) -> Option<Notification> {
        self.ledger.insert(date, present);
        let status = if present { "PRESENT" } else { "ABSENT" };
        info!(
            role = %self.role(),
            name = %self.name,
            date = %format_date(date),
            status,
            "Attendance marked"
        );

        if present {
            return None;
        }
        let notification = self.kind.behavior().absence_notification(&self.name);
        warn!(id = %self.id, "{}", notification);
        Some(notification)
    }

    pub fn present_days(&self) -> usize {
        self.ledger.values().filter(|present| **present).count()
    }

    pub fn marked_days(&self) -> usize {
        self.ledger.len()
    }

    /// Share of marked days present, 0.0 when nothing has been marked.
    pub fn attendance_percentage(&self) -> f64 {
        let total = self.marked_days();
        if total == 0 {
            return 0.0;
        }
        self.present_days() as f64 / total as f64 * 100.0
    }

    pub fn meets_requirement(&self) -> bool {
        self.attendance_percentage() >= self.minimum_requirement()
    }

    pub fn handle_low_attendance(&mut self) -> Escalation {
        self.escalation_count += 1;
        let escalation = self
            .kind
            .behavior()
            .escalation(self.escalation_count, &self.policy);
        warn!(
            id = %self.id,
            name = %self.name,
            count = escalation.count,
            critical = escalation.critical,
            actions = ?escalation.actions,
            "{}",
            escalation.headline
        );
        escalation
    }

    /// Summarize this person. Escalates first when below requirement, so the
    /// role details reflect the new count.
    pub fn describe(&mut self) -> PersonProfile {
        let attendance_pct = self.attendance_percentage();
        let requirement_pct = self.minimum_requirement();
        let meets_requirement = attendance_pct >= requirement_pct;

        let escalation = if meets_requirement {
            None
        } else {
            Some(self.handle_low_attendance())
        };

        PersonProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role(),
            attendance_pct,
            requirement_pct,
            meets_requirement,
            escalation,
            details: self.kind.behavior().details(self.escalation_count),
        }
    }
}
