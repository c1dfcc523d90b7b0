//! Attendance policy configuration.
//!
//! This module handles loading and saving the institution configuration,
//! which includes the institution name, the per-role attendance policy,
//! the cutoff used for issue reports and the size of the school-day window.
//!
//! Configuration is stored at `~/.config/rollcall/config.json` unless the
//! `ROLLCALL_CONFIG` environment variable points elsewhere.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AttendanceError;
use crate::models::Role;

/// Application name used for config directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "ROLLCALL_CONFIG";

pub const DEFAULT_INSTITUTION: &str = "Rollcall Academy";
pub const DEFAULT_ISSUE_THRESHOLD_PCT: f64 = 80.0;
pub const DEFAULT_SCHOOL_DAY_COUNT: usize = 10;

/// Attendance policy for one role: the minimum requirement and the
/// escalation count at which messages turn critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RolePolicy {
    pub minimum_requirement_pct: f64,
    pub critical_escalation_at: u32,
}

impl RolePolicy {
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Student => Self {
                minimum_requirement_pct: 75.0,
                critical_escalation_at: 3,
            },
            // Source variants disagreed (85 vs 90); 85 is the default.
            Role::Teacher => Self {
                minimum_requirement_pct: 85.0,
                critical_escalation_at: 5,
            },
        }
    }

    pub fn validate(&self, role: Role) -> std::result::Result<(), AttendanceError> {
        if !(0.0..=100.0).contains(&self.minimum_requirement_pct) {
            return Err(AttendanceError::validation(format!(
                "{} minimum requirement must be between 0 and 100, got: {}",
                role, self.minimum_requirement_pct
            )));
        }
        if self.critical_escalation_at == 0 {
            return Err(AttendanceError::validation(format!(
                "{} critical escalation count must be at least 1",
                role
            )));
        }
        Ok(())
    }
}

/// Check a percentage cutoff for issue reports: finite and within [0, 100].
pub fn validate_threshold(threshold_pct: f64) -> std::result::Result<(), AttendanceError> {
    if !(0.0..=100.0).contains(&threshold_pct) {
        return Err(AttendanceError::validation(format!(
            "Issue threshold must be between 0 and 100, got: {}",
            threshold_pct
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub institution_name: String,
    pub student: RolePolicy,
    pub teacher: RolePolicy,
    pub issue_threshold_pct: f64,
    pub school_day_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            institution_name: DEFAULT_INSTITUTION.to_string(),
            student: RolePolicy::default_for(Role::Student),
            teacher: RolePolicy::default_for(Role::Teacher),
            issue_threshold_pct: DEFAULT_ISSUE_THRESHOLD_PCT,
            school_day_count: DEFAULT_SCHOOL_DAY_COUNT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            debug!(path = %path.display(), "No config file found, using defaults");
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn policy_for(&self, role: Role) -> RolePolicy {
        match role {
            Role::Student => self.student,
            Role::Teacher => self.teacher,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), AttendanceError> {
        if self.institution_name.trim().is_empty() {
            return Err(AttendanceError::validation("Institution name cannot be empty"));
        }
        self.student.validate(Role::Student)?;
        self.teacher.validate(Role::Teacher)?;
        validate_threshold(self.issue_threshold_pct)?;
        if self.school_day_count == 0 {
            return Err(AttendanceError::validation(
                "School day count must be at least 1",
            ));
        }
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = Config::default();
        assert_eq!(config.policy_for(Role::Student).minimum_requirement_pct, 75.0);
        assert_eq!(config.policy_for(Role::Teacher).minimum_requirement_pct, 85.0);
        assert_eq!(config.student.critical_escalation_at, 3);
        assert_eq!(config.teacher.critical_escalation_at, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "institution_name": "North High", "teacher": { "minimum_requirement_pct": 90.0, "critical_escalation_at": 5 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.institution_name, "North High");
        assert_eq!(config.teacher.minimum_requirement_pct, 90.0);
        assert_eq!(config.student.minimum_requirement_pct, 75.0);
        assert_eq!(config.school_day_count, 10);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut config = Config::default();
        config.student.minimum_requirement_pct = 120.0;
        assert!(matches!(config.validate(), Err(AttendanceError::Validation(_))));

        let mut config = Config::default();
        config.teacher.critical_escalation_at = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.school_day_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_issue_threshold_range() {
        for bad in [-0.1, 100.5, f64::NAN] {
            let mut config = Config::default();
            config.issue_threshold_pct = bad;
            assert!(matches!(config.validate(), Err(AttendanceError::Validation(_))));
        }
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(100.0).is_ok());
    }

    #[test]
    fn test_load_rejects_out_of_range_threshold() {
        let path = std::env::temp_dir().join("rollcall-test-bad-threshold.json");
        std::fs::write(&path, r#"{ "issue_threshold_pct": -5.0 }"#).unwrap();
        assert!(Config::load_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = std::env::temp_dir().join("rollcall-test-save-config");
        let path = dir.join(CONFIG_FILE);
        let _ = std::fs::remove_dir_all(&dir);

        let mut config = Config::default();
        config.institution_name = "Westfield College".to_string();
        config.teacher.minimum_requirement_pct = 90.0;
        config.issue_threshold_pct = 70.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.institution_name, "Westfield College");
        assert_eq!(loaded.teacher.minimum_requirement_pct, 90.0);
        assert_eq!(loaded.issue_threshold_pct, 70.0);
        assert_eq!(loaded.student, config.student);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let path = std::env::temp_dir().join("rollcall-test-invalid-save.json");
        let _ = std::fs::remove_file(&path);
        let mut config = Config::default();
        config.issue_threshold_pct = 150.0;
        assert!(config.save_to(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("rollcall-test-missing-config.json");
        let _ = std::fs::remove_file(&path);
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.institution_name, DEFAULT_INSTITUTION);
    }
}
