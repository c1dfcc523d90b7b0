//! Rollcall core - attendance tracking for students and staff.
//!
//! This crate records daily presence per person, derives attendance
//! percentages, applies role-specific policy (minimum requirement and
//! escalation on repeated shortfall) and reports on the whole population.
//!
//! - `models`: `Person` with its ledger, plus the Student and Teacher roles
//! - `registry`: the keyed collection of persons and the school-day window
//! - `report`: comprehensive reports and threshold-based issue lists
//! - `config`: institution name and per-role attendance policy

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;
pub mod utils;

pub use config::{validate_threshold, Config, RolePolicy};
pub use error::{AttendanceError, Result};
pub use models::{
    Escalation, Notification, Person, PersonKind, PersonProfile, Role, RoleBehavior, RoleDetails,
    SalaryBracket, StudentProfile, TeacherProfile,
};
pub use registry::{BulkOutcome, Registry};
pub use report::{AttendanceIssue, ComprehensiveReport, IssueList, ReportingEngine, Statistics};
