//! Form state holder

use super::submission::WaitlistSubmission;
use crate::domain::waitlist::TargetLanguage;

/// Latest user input plus the in-progress flag.
///
/// Setters store values verbatim; nothing is validated until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    email: String,
    target_language: Option<TargetLanguage>,
    submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn target_language(&self) -> Option<TargetLanguage> {
        self.target_language
    }

    pub fn set_target_language(&mut self, target_language: Option<TargetLanguage>) {
        self.target_language = target_language;
    }

    /// True while a registration call is outstanding
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(super) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Fresh submission built from the current values
    pub fn submission(&self) -> WaitlistSubmission {
        WaitlistSubmission::new(self.email.clone(), self.target_language)
    }
}
