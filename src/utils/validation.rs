// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{AuditError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AuditError::Config(format!("Invalid URL format: {}", url)));
        }
        Ok(())
    }

    /// Organization and user logins: alphanumerics and single inner hyphens,
    /// at most 39 characters.
    pub fn validate_login(login: &str) -> Result<()> {
        if login.is_empty() || login.len() > 39 {
            return Err(AuditError::Config(format!(
                "Invalid login length: {:?}",
                login
            )));
        }

        if login.starts_with('-') || login.ends_with('-') || login.contains("--") {
            return Err(AuditError::Config(format!(
                "Login cannot start or end with a hyphen or contain consecutive hyphens: {}",
                login
            )));
        }

        if !login
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(AuditError::Config(format!(
                "Login contains invalid characters: {}",
                login
            )));
        }

        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}
