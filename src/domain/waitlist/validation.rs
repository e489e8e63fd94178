//! Email checks applied by the system of record

use thiserror::Error;
use validator::ValidateEmail;

/// Longest address accepted (RFC 5321 forward-path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EmailValidationError {
    #[error("email is required")]
    Empty,

    #[error("email cannot exceed {0} characters")]
    TooLong(usize),

    #[error("'{0}' is not a valid email address")]
    Malformed(String),
}

/// Canonical form used as the waitlist key: trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an already normalized address
pub fn validate_email(email: &str) -> Result<(), EmailValidationError> {
    if email.is_empty() {
        return Err(EmailValidationError::Empty);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(EmailValidationError::TooLong(MAX_EMAIL_LENGTH));
    }

    if !email.validate_email() {
        return Err(EmailValidationError::Malformed(email.to_string()));
    }

    Ok(())
}

/// Masks the local part so logs never carry a full address
pub fn redact_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
