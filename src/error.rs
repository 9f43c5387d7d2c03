//! Custom error types for clubwatch
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for clubwatch operations
#[derive(Error, Debug)]
pub enum ClubwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Audit store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Validation errors for incoming change events
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record not found errors
    #[error("Audit record not found: {0}")]
    RecordNotFound(String),

    /// Notification errors
    #[error("Notification error: {0}")]
    Notify(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ClubwatchError {
    /// Check if this is a "record not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ClubwatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClubwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for clubwatch operations
pub type ClubwatchResult<T> = Result<T, ClubwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClubwatchError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ClubwatchError::RecordNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Audit record not found: abc-123");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cw_err: ClubwatchError = io_err.into();
        assert!(matches!(cw_err, ClubwatchError::Io(_)));
    }
}
