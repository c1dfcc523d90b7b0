use serde::Serialize;

use crate::config::RolePolicy;
use crate::error::{require_non_blank, AttendanceError, Result};
use crate::models::person::{Escalation, Notification, Role, RoleBehavior};
use crate::models::profile::RoleDetails;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SalaryBracket {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl SalaryBracket {
    pub fn from_salary(salary: f64) -> Self {
        if salary < 40_000.0 {
            SalaryBracket::Entry
        } else if salary < 70_000.0 {
            SalaryBracket::Mid
        } else if salary < 100_000.0 {
            SalaryBracket::Senior
        } else {
            SalaryBracket::Executive
        }
    }
}

impl std::fmt::Display for SalaryBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SalaryBracket::Entry => write!(f, "Entry Level"),
            SalaryBracket::Mid => write!(f, "Mid Level"),
            SalaryBracket::Senior => write!(f, "Senior Level"),
            SalaryBracket::Executive => write!(f, "Executive Level"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherProfile {
    subject: String,
    years_experience: u32,
    salary: f64,
    qualifications: Vec<String>,
}

impl TeacherProfile {
    pub fn new(subject: &str, years_experience: u32, salary: f64) -> Result<Self> {
        let mut profile = Self {
            subject: require_non_blank(subject, "Subject")?,
            years_experience,
            salary: 0.0,
            qualifications: Vec::new(),
        };
        profile.set_salary(salary)?;
        Ok(profile)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn years_experience(&self) -> u32 {
        self.years_experience
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn salary_bracket(&self) -> SalaryBracket {
        SalaryBracket::from_salary(self.salary)
    }

    pub fn qualifications(&self) -> &[String] {
        &self.qualifications
    }

    pub fn set_subject(&mut self, subject: &str) -> Result<()> {
        self.subject = require_non_blank(subject, "Subject")?;
        Ok(())
    }

    pub fn set_years_experience(&mut self, years: u32) {
        self.years_experience = years;
    }

    pub fn set_salary(&mut self, salary: f64) -> Result<()> {
        if !salary.is_finite() || salary < 0.0 {
            return Err(AttendanceError::validation(format!(
                "Salary cannot be negative, got: {}",
                salary
            )));
        }
        self.salary = salary;
        Ok(())
    }

    /// Append a qualification. Blank entries are dropped; returns whether it was added.
    pub fn add_qualification(&mut self, qualification: &str) -> bool {
        let qualification = qualification.trim();
        if qualification.is_empty() {
            return false;
        }
        self.qualifications.push(qualification.to_string());
        true
    }
}

impl RoleBehavior for TeacherProfile {
    fn role(&self) -> Role {
        Role::Teacher
    }

    fn escalation(&self, count: u32, policy: &RolePolicy) -> Escalation {
        let critical = count >= policy.critical_escalation_at;
        let mut actions = vec![
            "Substitute teacher arrangement needed".to_string(),
            "Department head notification sent".to_string(),
            "Student impact assessment required".to_string(),
        ];
        if critical {
            actions.push("HR review recommended".to_string());
        }
        Escalation {
            count,
            headline: format!("TEACHER ABSENCE PROTOCOL #{}", count),
            actions,
            critical,
        }
    }

    fn absence_notification(&self, _name: &str) -> Notification {
        Notification::SubstituteArranged {
            subject: self.subject.clone(),
        }
    }

    fn details(&self, escalation_count: u32) -> RoleDetails {
        RoleDetails::Teacher {
            subject: self.subject.clone(),
            years_experience: self.years_experience,
            salary_bracket: self.salary_bracket(),
            qualifications: self.qualifications.clone(),
            substitute_requests: escalation_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_brackets() {
        assert_eq!(SalaryBracket::from_salary(0.0), SalaryBracket::Entry);
        assert_eq!(SalaryBracket::from_salary(39_999.99), SalaryBracket::Entry);
        assert_eq!(SalaryBracket::from_salary(40_000.0), SalaryBracket::Mid);
        assert_eq!(SalaryBracket::from_salary(58_000.0), SalaryBracket::Mid);
        assert_eq!(SalaryBracket::from_salary(75_000.0), SalaryBracket::Senior);
        assert_eq!(SalaryBracket::from_salary(100_000.0), SalaryBracket::Executive);
        assert_eq!(SalaryBracket::Senior.to_string(), "Senior Level");
    }

    #[test]
    fn test_negative_salary_rejected() {
        assert!(matches!(
            TeacherProfile::new("Physics", 5, -1.0),
            Err(AttendanceError::Validation(_))
        ));
        let mut profile = TeacherProfile::new("Physics", 5, 58_000.0).unwrap();
        assert!(profile.set_salary(-100.0).is_err());
        assert!(profile.set_salary(f64::NAN).is_err());
        assert_eq!(profile.salary(), 58_000.0);
        assert!(profile.set_salary(0.0).is_ok());
    }

    #[test]
    fn test_blank_subject_rejected() {
        assert!(TeacherProfile::new(" ", 1, 1.0).is_err());
        let mut profile = TeacherProfile::new("English", 12, 82_000.0).unwrap();
        assert!(profile.set_subject("\t").is_err());
        assert_eq!(profile.subject(), "English");
    }

    #[test]
    fn test_qualifications_append_and_skip_blank() {
        let mut profile = TeacherProfile::new("Mathematics", 8, 75_000.0).unwrap();
        assert!(profile.add_qualification("PhD in Mathematics"));
        assert!(!profile.add_qualification(""));
        assert!(profile.add_qualification("Teaching Certification"));
        assert_eq!(
            profile.qualifications(),
            ["PhD in Mathematics", "Teaching Certification"]
        );
    }
}
