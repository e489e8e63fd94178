//! Waitlist signup workflow
//!
//! Form state, the client-side validator, the submission controller, the
//! view selector and the notification contract.

mod controller;
mod form;
mod notification;
mod submission;
mod view;

pub use controller::{SignupWorkflow, SubmissionPhase, SubmitOutcome};
pub use form::FormState;
pub use notification::{Notification, Notifier, Severity};
pub use submission::{validate, ValidationError, WaitlistSubmission};
pub use view::{select_view, View};

#[cfg(test)]
pub use notification::MockNotifier;
