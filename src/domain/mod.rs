//! Domain layer - Core business logic and entities

pub mod error;
pub mod signup;
pub mod storage;
pub mod waitlist;

pub use error::DomainError;
pub use signup::{
    FormState, Notification, Notifier, Severity, SignupWorkflow, SubmissionPhase, SubmitOutcome,
    ValidationError, View, WaitlistSubmission,
};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use waitlist::{
    EntryKey, RegistrationError, RegistrationRecord, RegistrationService, TargetLanguage,
    WaitlistEntry, WaitlistQuery, WaitlistRepository, WaitlistStats,
};
