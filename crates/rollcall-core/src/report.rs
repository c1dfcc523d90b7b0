//! Attendance reporting.
//!
//! `ReportingEngine` walks the registry to build a comprehensive report
//! (every profile, then aggregate statistics) and to list people under a
//! caller-supplied attendance cutoff. The cutoff is independent of each
//! person's own role requirement.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{PersonProfile, Role};
use crate::registry::Registry;
use crate::utils::{format_date, format_percent, rule};

/// Width of the report banner rules
const REPORT_RULE_WIDTH: usize = 60;

/// Width of the statistics and issue list rules
const SECTION_RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub persons: usize,
    pub students: usize,
    pub teachers: usize,
    pub average_attendance_pct: f64,
    pub below_requirement: usize,
    pub school_days_tracked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveReport {
    pub institution: String,
    pub report_date: NaiveDate,
    pub profiles: Vec<PersonProfile>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceIssue {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub attendance_pct: f64,
}

/// People below a cutoff, kept together with the cutoff for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueList {
    pub threshold_pct: f64,
    pub issues: Vec<AttendanceIssue>,
}

pub struct ReportingEngine {
    report_date: NaiveDate,
}

impl Default for ReportingEngine {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl ReportingEngine {
    pub fn new(report_date: NaiveDate) -> Self {
        Self { report_date }
    }

    /// Describe every person, then aggregate.
    ///
    /// Describing someone below their requirement escalates them, so this
    /// bumps escalation counters as a side effect.
    pub fn comprehensive_report(&self, registry: &mut Registry) -> ComprehensiveReport {
        let profiles: Vec<PersonProfile> =
            registry.persons_mut().map(|person| person.describe()).collect();
        let statistics = Self::statistics(registry);

        info!(
            persons = statistics.persons,
            below_requirement = statistics.below_requirement,
            "Comprehensive report generated"
        );

        ComprehensiveReport {
            institution: registry.institution_name().to_string(),
            report_date: self.report_date,
            profiles,
            statistics,
        }
    }

    pub fn statistics(registry: &Registry) -> Statistics {
        let mut stats = Statistics {
            persons: registry.len(),
            school_days_tracked: registry.school_days().len(),
            ..Statistics::default()
        };

        let mut total_attendance = 0.0;
        for person in registry.persons() {
            match person.role() {
                Role::Student => stats.students += 1,
                Role::Teacher => stats.teachers += 1,
            }
            let attendance = person.attendance_percentage();
            total_attendance += attendance;
            if attendance < person.minimum_requirement() {
                stats.below_requirement += 1;
            }
        }

        if stats.persons > 0 {
            stats.average_attendance_pct = total_attendance / stats.persons as f64;
        }
        stats
    }

    /// People whose attendance is strictly below `threshold_pct`, in id order.
    pub fn attendance_issues(&self, registry: &Registry, threshold_pct: f64) -> IssueList {
        let issues: Vec<AttendanceIssue> = registry
            .persons()
            .filter(|person| person.attendance_percentage() < threshold_pct)
            .map(|person| AttendanceIssue {
                id: person.id().to_string(),
                name: person.name().to_string(),
                role: person.role(),
                attendance_pct: person.attendance_percentage(),
            })
            .collect();

        debug!(threshold = threshold_pct, found = issues.len(), "Attendance issues checked");
        IssueList {
            threshold_pct,
            issues,
        }
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", rule('=', SECTION_RULE_WIDTH))?;
        writeln!(f, "SYSTEM STATISTICS")?;
        writeln!(f, "{}", rule('=', SECTION_RULE_WIDTH))?;
        writeln!(f, "Persons Registered: {}", self.persons)?;
        writeln!(f, "Students: {}", self.students)?;
        writeln!(f, "Teachers: {}", self.teachers)?;
        writeln!(f, "Average Attendance: {}", format_percent(self.average_attendance_pct))?;
        writeln!(f, "Below Requirements: {}", self.below_requirement)?;
        writeln!(f, "School Days Tracked: {}", self.school_days_tracked)
    }
}

impl std::fmt::Display for ComprehensiveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", rule('=', REPORT_RULE_WIDTH))?;
        writeln!(f, "COMPREHENSIVE ATTENDANCE REPORT")?;
        writeln!(f, "Institution: {}", self.institution)?;
        writeln!(f, "Report Date: {}", format_date(self.report_date))?;
        writeln!(f, "{}", rule('=', REPORT_RULE_WIDTH))?;

        if self.profiles.is_empty() {
            writeln!(f, "No persons registered in the system.")?;
        }
        for profile in &self.profiles {
            writeln!(f)?;
            write!(f, "{}", profile)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.statistics)
    }
}

impl std::fmt::Display for IssueList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ATTENDANCE ISSUES (Below {}):", format_percent(self.threshold_pct))?;
        writeln!(f, "{}", rule('-', SECTION_RULE_WIDTH))?;
        if self.issues.is_empty() {
            return writeln!(f, "No attendance issues found!");
        }
        for issue in &self.issues {
            writeln!(
                f,
                "{}: {} ({}) - {}",
                issue.role,
                issue.name,
                issue.id,
                format_percent(issue.attendance_pct)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::school_days_from;
    use crate::config::Config;
    use crate::models::Person;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn registry() -> Registry {
        Registry::with_school_days(Config::default(), school_days_from(today(), 10))
    }

    /// S1 at 80% (4 of 5), T1 at 100% (5 of 5)
    fn two_person_registry() -> Registry {
        let mut reg = registry();
        reg.register(Person::student("Alice Johnson", "S1", "Grade 10", 3.8).unwrap())
            .unwrap();
        reg.register(Person::teacher("Dr. Sarah Wilson", "T1", "Mathematics", 8, 75_000.0).unwrap())
            .unwrap();

        let days: Vec<NaiveDate> = reg.school_days()[..5].to_vec();
        for (i, day) in days.iter().enumerate() {
            reg.mark_attendance("S1", *day, i < 4).unwrap();
            reg.mark_attendance("T1", *day, true).unwrap();
        }
        reg
    }

    // -------------------------------------------------------------------------
    // Issues
    // -------------------------------------------------------------------------

    #[test]
    fn test_issue_threshold_is_independent_of_requirement() {
        let mut reg = two_person_registry();
        let engine = ReportingEngine::new(today());

        let list = engine.attendance_issues(&reg, 85.0);
        let ids: Vec<&str> = list.issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["S1"]);
        assert_eq!(list.issues[0].role, Role::Student);
        assert!((list.issues[0].attendance_pct - 80.0).abs() < 1e-9);

        let report = engine.comprehensive_report(&mut reg);
        assert_eq!(report.statistics.below_requirement, 0);
    }

    #[test]
    fn test_issue_threshold_is_strict() {
        let reg = two_person_registry();
        let engine = ReportingEngine::new(today());
        assert!(engine.attendance_issues(&reg, 80.0).issues.is_empty());
        assert_eq!(engine.attendance_issues(&reg, 100.1).issues.len(), 2);
    }

    #[test]
    fn test_no_issues_text() {
        let reg = registry();
        let list = ReportingEngine::new(today()).attendance_issues(&reg, 80.0);
        let text = list.to_string();
        assert!(text.contains("Below 80.0%"));
        assert!(text.contains("No attendance issues found!"));
    }

    // -------------------------------------------------------------------------
    // Comprehensive report
    // -------------------------------------------------------------------------

    #[test]
    fn test_statistics() {
        let mut reg = two_person_registry();
        let report = ReportingEngine::new(today()).comprehensive_report(&mut reg);
        let stats = &report.statistics;
        assert_eq!(stats.persons, 2);
        assert_eq!(stats.students, 1);
        assert_eq!(stats.teachers, 1);
        assert!((stats.average_attendance_pct - 90.0).abs() < 1e-9);
        assert_eq!(stats.school_days_tracked, 10);
        assert_eq!(report.institution, "Rollcall Academy");
    }

    #[test]
    fn test_empty_registry_report() {
        let mut reg = registry();
        let report = ReportingEngine::new(today()).comprehensive_report(&mut reg);
        assert!(report.profiles.is_empty());
        assert_eq!(report.statistics.average_attendance_pct, 0.0);
        assert_eq!(report.statistics.persons, 0);
        assert!(report.to_string().contains("No persons registered in the system."));
    }

    #[test]
    fn test_report_escalates_people_below_requirement() {
        let mut reg = two_person_registry();
        let day = reg.school_days()[5];
        reg.register(Person::teacher("Mr. John Davis", "T2", "Physics", 5, 58_000.0).unwrap())
            .unwrap();
        reg.mark_attendance("T2", day, false).unwrap();

        let engine = ReportingEngine::new(today());
        let report = engine.comprehensive_report(&mut reg);
        assert_eq!(report.statistics.below_requirement, 1);
        assert_eq!(reg.find("T2").unwrap().escalation_count(), 1);
        assert_eq!(reg.find("S1").unwrap().escalation_count(), 0);

        engine.comprehensive_report(&mut reg);
        assert_eq!(reg.find("T2").unwrap().escalation_count(), 2);
    }

    #[test]
    fn test_report_layout_profiles_then_statistics() {
        let mut reg = two_person_registry();
        let text = ReportingEngine::new(today()).comprehensive_report(&mut reg).to_string();
        assert!(text.contains("Report Date: 14-03-2024"));
        let student_at = text.find("STUDENT PROFILE").unwrap();
        let teacher_at = text.find("TEACHER PROFILE").unwrap();
        let stats_at = text.find("SYSTEM STATISTICS").unwrap();
        assert!(student_at < teacher_at);
        assert!(teacher_at < stats_at);
    }

    #[test]
    fn test_report_serializes() {
        let mut reg = two_person_registry();
        let report = ReportingEngine::new(today()).comprehensive_report(&mut reg);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["report_date"], "2024-03-14");
        assert_eq!(json["profiles"].as_array().map(|p| p.len()), Some(2));
        assert_eq!(json["statistics"]["students"], 1);
    }
}
