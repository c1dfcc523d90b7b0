use crate::config::RolePolicy;
use crate::error::{require_non_blank, AttendanceError, Result};
use crate::models::person::{Escalation, Notification, Role, RoleBehavior};
use crate::models::profile::RoleDetails;

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    grade_level: String,
    gpa: f64,
    subjects: Vec<String>,
}

impl StudentProfile {
    pub fn new(grade_level: &str, gpa: f64) -> Result<Self> {
        let mut profile = Self {
            grade_level: require_non_blank(grade_level, "Grade")?,
            gpa: MIN_GPA,
            subjects: Vec::new(),
        };
        profile.set_gpa(gpa)?;
        Ok(profile)
    }

    pub fn grade_level(&self) -> &str {
        &self.grade_level
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn set_grade_level(&mut self, grade_level: &str) -> Result<()> {
        self.grade_level = require_non_blank(grade_level, "Grade")?;
        Ok(())
    }

    pub fn set_gpa(&mut self, gpa: f64) -> Result<()> {
        if !(MIN_GPA..=MAX_GPA).contains(&gpa) {
            return Err(AttendanceError::validation(format!(
                "GPA must be between 0.0 and 4.0, got: {}",
                gpa
            )));
        }
        self.gpa = gpa;
        Ok(())
    }

    /// Append a subject. Blank entries are dropped; returns whether it was added.
    pub fn add_subject(&mut self, subject: &str) -> bool {
        let subject = subject.trim();
        if subject.is_empty() {
            return false;
        }
        self.subjects.push(subject.to_string());
        true
    }
}

impl RoleBehavior for StudentProfile {
    fn role(&self) -> Role {
        Role::Student
    }

    fn escalation(&self, count: u32, policy: &RolePolicy) -> Escalation {
        let critical = count >= policy.critical_escalation_at;
        let mut actions = vec![
            "Parents will be contacted".to_string(),
            "Academic probation risk".to_string(),
        ];
        if critical {
            actions.push("CRITICAL: Consider academic counseling".to_string());
        }
        Escalation {
            count,
            headline: format!("STUDENT WARNING #{}", count),
            actions,
            critical,
        }
    }

    fn absence_notification(&self, name: &str) -> Notification {
        Notification::ParentContacted {
            student: name.to_string(),
        }
    }

    fn details(&self, escalation_count: u32) -> RoleDetails {
        RoleDetails::Student {
            grade_level: self.grade_level.clone(),
            gpa: self.gpa,
            subjects: self.subjects.clone(),
            warnings: escalation_count,
        }
    }
}
