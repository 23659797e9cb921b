use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub const MAX_RECIPIENTS: usize = 10;
pub const MAX_HANDLE_LEN: usize = 30;

/// A validated recipient identifier: lower-case `[a-z0-9._]`, at most 30 chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientHandle(String);

impl RecipientHandle {
    /// Sanitises raw operator input (trim, lower-case, drop one `@`) and validates it.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let sanitized = raw.trim().to_lowercase().replacen('@', "", 1);

        if sanitized.is_empty() {
            return Err(DomainError::Validation("handle is empty".to_string()));
        }
        if !sanitized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
        {
            return Err(DomainError::Validation(
                "invalid characters (use a-z, 0-9, ., _)".to_string(),
            ));
        }
        if sanitized.chars().count() > MAX_HANDLE_LEN {
            return Err(DomainError::Validation(format!(
                "too long (max {MAX_HANDLE_LEN} chars)"
            )));
        }

        Ok(Self(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecipientHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
