use thiserror::Error;

/// Result type alias for attendance operations
pub type Result<T> = std::result::Result<T, AttendanceError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttendanceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Person with ID {0} already exists")]
    DuplicateId(String),

    #[error("No person found with ID: {0}")]
    NotFound(String),
}

impl AttendanceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AttendanceError::Validation(msg.into())
    }

    /// True for a lookup miss on an operation that needed an existing person.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, AttendanceError::NotFound(_))
    }
}

/// Trim a required string field, rejecting blank input.
pub(crate) fn require_non_blank(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AttendanceError::validation(format!(
            "{} cannot be null or empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank_trims() {
        assert_eq!(require_non_blank("  Alice ", "Name").unwrap(), "Alice");
    }

    #[test]
    fn test_require_non_blank_rejects_whitespace() {
        let err = require_non_blank("   ", "ID").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: ID cannot be null or empty");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AttendanceError::DuplicateId("S1".into()).to_string(),
            "Person with ID S1 already exists"
        );
        assert!(AttendanceError::NotFound("X".into()).is_lookup_miss());
        assert!(!AttendanceError::validation("bad").is_lookup_miss());
    }
}
