//! Data models for attendance tracking.
//!
//! This module contains the data structures used to represent people and
//! their attendance:
//!
//! - `Person`: identity, attendance ledger, escalation counter and policy
//! - `StudentProfile`, `TeacherProfile`: role-specific attributes and behavior
//! - `PersonProfile`, `RoleDetails`: display snapshots produced by `describe`

pub mod person;
pub mod profile;
pub mod student;
pub mod teacher;

pub use person::{Escalation, Notification, Person, PersonKind, Role, RoleBehavior};
pub use profile::{PersonProfile, RoleDetails};
pub use student::StudentProfile;
pub use teacher::{SalaryBracket, TeacherProfile};
