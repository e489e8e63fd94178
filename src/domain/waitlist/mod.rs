//! Waitlist domain module
//!
//! Entries are keyed by normalized email. The registration contract lives
//! here so both the signup workflow and the HTTP API share it.

mod entity;
mod language;
mod registration;
mod repository;
mod validation;

pub use entity::{EntryKey, RegistrationRecord, WaitlistEntry, WaitlistStats, UNSET_LANGUAGE};
pub use language::{ParseLanguageError, TargetLanguage};
pub use registration::{RegistrationError, RegistrationService};
pub use repository::{WaitlistQuery, WaitlistRepository};
pub use validation::{
    normalize_email, redact_email, validate_email, EmailValidationError, MAX_EMAIL_LENGTH,
};

#[cfg(test)]
pub use registration::MockRegistrationService;
