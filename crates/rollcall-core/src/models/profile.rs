use serde::Serialize;

use crate::models::person::{Escalation, Role};
use crate::models::teacher::SalaryBracket;
use crate::utils::{format_percent, rule};

/// Width of the rule drawn around a profile header
const PROFILE_RULE_WIDTH: usize = 40;

/// Role-specific fields appended to a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role")]
pub enum RoleDetails {
    Student {
        grade_level: String,
        gpa: f64,
        subjects: Vec<String>,
        warnings: u32,
    },
    Teacher {
        subject: String,
        years_experience: u32,
        salary_bracket: SalaryBracket,
        qualifications: Vec<String>,
        substitute_requests: u32,
    },
}

/// Snapshot of one person produced by `Person::describe`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonProfile {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub attendance_pct: f64,
    pub requirement_pct: f64,
    pub meets_requirement: bool,
    pub escalation: Option<Escalation>,
    pub details: RoleDetails,
}

impl std::fmt::Display for PersonProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", rule('=', PROFILE_RULE_WIDTH))?;
        writeln!(f, "{} PROFILE", self.role.to_string().to_uppercase())?;
        writeln!(f, "{}", rule('=', PROFILE_RULE_WIDTH))?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Attendance: {}", format_percent(self.attendance_pct))?;
        writeln!(f, "Required: {}", format_percent(self.requirement_pct))?;
        if self.meets_requirement {
            writeln!(f, "Status: MEETS REQUIREMENT")?;
        } else {
            writeln!(f, "Status: BELOW REQUIREMENT")?;
        }
        if let Some(ref escalation) = self.escalation {
            write!(f, "{}", escalation)?;
        }
        write!(f, "{}", self.details)
    }
}

impl std::fmt::Display for RoleDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleDetails::Student {
                grade_level,
                gpa,
                subjects,
                warnings,
            } => {
                writeln!(f, "Grade Level: {}", grade_level)?;
                writeln!(f, "GPA: {:.2}", gpa)?;
                writeln!(f, "Enrolled Subjects: {}", subjects.len())?;
                for (i, subject) in subjects.iter().enumerate() {
                    writeln!(f, "  {}. {}", i + 1, subject)?;
                }
                if *warnings > 0 {
                    writeln!(f, "Total Warnings: {}", warnings)?;
                }
            }
            RoleDetails::Teacher {
                subject,
                years_experience,
                salary_bracket,
                qualifications,
                substitute_requests,
            } => {
                writeln!(f, "Subject: {}", subject)?;
                writeln!(f, "Experience: {} years", years_experience)?;
                writeln!(f, "Salary Category: {}", salary_bracket)?;
                writeln!(f, "Qualifications: {}", qualifications.len())?;
                for qualification in qualifications {
                    writeln!(f, "  * {}", qualification)?;
                }
                if *substitute_requests > 0 {
                    writeln!(f, "Substitute Requests: {}", substitute_requests)?;
                }
            }
        }
        Ok(())
    }
}
