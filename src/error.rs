// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error for {target}: {message}")]
    Transport { target: String, message: String },

    #[error("Authentication failed for {target} (status {status})")]
    Auth { target: String, status: u16 },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),

    #[error("API request to {target} failed with status {status}: {body}")]
    Api {
        target: String,
        status: u16,
        body: String,
    },

    #[error("Malformed payload from {target}: {message}")]
    Parse { target: String, message: String },

    #[error("Invalid timestamp {value:?} on repository {repository}: {message}")]
    Timestamp {
        repository: String,
        value: String,
        message: String,
    },

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuditError {
    /// Failures that mean "the resource is absent" rather than "the call broke".
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuditError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_target() {
        let err = AuditError::Auth {
            target: "https://api.github.com/orgs/acme/repos".to_string(),
            status: 401,
        };
        let message = err.to_string();
        assert!(message.contains("/orgs/acme/repos"));
        assert!(message.contains("401"));
    }

    #[test]
    fn test_not_found_detection() {
        assert!(AuditError::NotFound("x".to_string()).is_not_found());
        assert!(!AuditError::RateLimited("x".to_string()).is_not_found());
    }

    #[test]
    fn test_file_operation_names_path() {
        let err = AuditError::FileOperation {
            path: PathBuf::from("reports/audit.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("reports/audit.json"));
        assert!(message.contains("denied"));
    }
}
