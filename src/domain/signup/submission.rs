//! The value handed to the registration service on each submit

use thiserror::Error;

use crate::domain::waitlist::TargetLanguage;

/// Snapshot of the form taken when the user presses submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistSubmission {
    pub email: String,
    pub target_language: Option<TargetLanguage>,
}

impl WaitlistSubmission {
    pub fn new(email: impl Into<String>, target_language: Option<TargetLanguage>) -> Self {
        Self {
            email: email.into(),
            target_language,
        }
    }
}

/// Client-side gate failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email required")]
    MissingEmail,
}

/// Only presence is checked here; format is the registration service's call.
pub fn validate(submission: &WaitlistSubmission) -> Result<(), ValidationError> {
    if submission.email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_email_is_missing() {
        let submission = WaitlistSubmission::new("", None);
        assert_eq!(validate(&submission), Err(ValidationError::MissingEmail));
    }

    #[test]
    fn test_whitespace_email_is_missing() {
        let submission = WaitlistSubmission::new(" \t\n ", Some(TargetLanguage::Italian));
        assert_eq!(validate(&submission), Err(ValidationError::MissingEmail));
    }

    #[test]
    fn test_any_text_passes() {
        assert!(validate(&WaitlistSubmission::new("user@example.com", None)).is_ok());
        // format is not checked at this layer
        assert!(validate(&WaitlistSubmission::new("not an email", None)).is_ok());
    }
}
