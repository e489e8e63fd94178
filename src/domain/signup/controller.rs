//! Submission controller
//!
//! Drives one signup form through `Idle -> Submitting -> Resolved`. The
//! registration call is the only await point; every other step runs while
//! holding the state lock briefly and never across the await.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, info, warn};

use super::form::FormState;
use super::notification::{Notification, Notifier};
use super::submission::{validate, ValidationError, WaitlistSubmission};
use super::view::{select_view, View};
use crate::domain::waitlist::{
    redact_email, RegistrationError, RegistrationRecord, RegistrationService, TargetLanguage,
};

/// Where the workflow currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded(RegistrationRecord),
}

/// Result of pressing submit once
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The registration service accepted the submission
    Registered(RegistrationRecord),
    /// Blocked before reaching the service
    Invalid(ValidationError),
    /// The service failed; form values are kept for a retry
    Failed(RegistrationError),
    /// A submission was already in flight; nothing happened
    Ignored,
}

impl SubmitOutcome {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Registered(_) => "registered",
            Self::Invalid(_) => "invalid",
            Self::Failed(_) => "failed",
            Self::Ignored => "ignored",
        }
    }
}

#[derive(Debug, Default)]
struct WorkflowState {
    form: FormState,
    success: Option<RegistrationRecord>,
}

/// Waitlist signup workflow for a single visitor
pub struct SignupWorkflow {
    registration: Arc<dyn RegistrationService>,
    notifier: Arc<dyn Notifier>,
    submit_timeout: Option<Duration>,
    state: Mutex<WorkflowState>,
}

impl std::fmt::Debug for SignupWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupWorkflow")
            .field("submit_timeout", &self.submit_timeout)
            .field("state", &*self.lock())
            .finish()
    }
}

impl SignupWorkflow {
    pub fn new(registration: Arc<dyn RegistrationService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registration,
            notifier,
            submit_timeout: None,
            state: Mutex::new(WorkflowState::default()),
        }
    }

    /// Abandon a registration call after `timeout`. Off unless set.
    pub fn with_submit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Start from pre-filled values, e.g. a posted form
    pub fn with_form(self, form: FormState) -> Self {
        self.lock().form = form;
        self
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().form.set_email(email);
    }

    pub fn set_target_language(&self, target_language: Option<TargetLanguage>) {
        self.lock().form.set_target_language(target_language);
    }

    /// Snapshot of the form values and in-progress flag
    pub fn form(&self) -> FormState {
        self.lock().form.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().form.is_submitting()
    }

    pub fn phase(&self) -> SubmissionPhase {
        let state = self.lock();

        if state.form.is_submitting() {
            SubmissionPhase::Submitting
        } else if let Some(record) = &state.success {
            SubmissionPhase::Succeeded(record.clone())
        } else {
            SubmissionPhase::Idle
        }
    }

    pub fn view(&self) -> View {
        select_view(&self.phase())
    }

    /// "Back to Home" from the terminal view. Clears the success flag only;
    /// the form keeps its values and nothing is resubmitted.
    pub fn back_to_form(&self) {
        self.lock().success = None;
    }

    /// Handle one press of the submit control
    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut state = self.lock();

            if state.form.is_submitting() {
                debug!("Submit ignored: registration already in flight");
                return SubmitOutcome::Ignored;
            }

            let submission = state.form.submission();

            if let Err(err) = validate(&submission) {
                drop(state);
                debug!(error = %err, "Submission failed validation");
                self.notifier.notify(Notification::email_required());
                return SubmitOutcome::Invalid(err);
            }

            state.success = None;
            state.form.set_submitting(true);
            submission
        };

        let in_flight = InFlight { state: &self.state };

        info!(
            email = %redact_email(&submission.email),
            target_language = ?submission.target_language,
            "Submitting waitlist form"
        );

        match self.call_registration(&submission).await {
            Ok(record) => {
                self.lock().success = Some(record.clone());
                drop(in_flight);

                info!(entry_id = %record.id, "Joined waitlist");
                self.notifier.notify(Notification::welcome());
                SubmitOutcome::Registered(record)
            }
            Err(err) => {
                drop(in_flight);

                warn!(error = %err, kind = err.kind(), "Error submitting waitlist form");
                self.notifier.notify(Notification::something_went_wrong());
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn call_registration(
        &self,
        submission: &WaitlistSubmission,
    ) -> Result<RegistrationRecord, RegistrationError> {
        let call = AssertUnwindSafe(
            self.registration
                .register(&submission.email, submission.target_language),
        )
        .catch_unwind();

        let result = match self.submit_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => return Err(RegistrationError::TimedOut),
            },
            None => call.await,
        };

        result.unwrap_or_else(|_| {
            Err(RegistrationError::Unavailable(
                "registration call panicked".to_string(),
            ))
        })
    }
}

/// Clears the in-progress flag when dropped, whichever way the call ends.
struct InFlight<'a> {
    state: &'a Mutex<WorkflowState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .form
            .set_submitting(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signup::notification::{MockNotifier, Severity};
    use crate::domain::waitlist::MockRegistrationService;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use uuid::Uuid;

    fn record(email: &str, language: Option<TargetLanguage>) -> RegistrationRecord {
        RegistrationRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            target_language: language,
            created_at: Utc::now(),
            newly_created: true,
        }
    }

    fn notifier_expecting(severity: Severity, title: &'static str) -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(move |n| n.severity == severity && n.title.contains(title))
            .times(1)
            .return_const(());
        Arc::new(notifier)
    }

    fn silent_notifier() -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        Arc::new(notifier)
    }

    /// Registration backend that blocks until released
    #[derive(Default)]
    struct GatedRegistration {
        gate: Notify,
        calls: AtomicUsize,
    }

    impl GatedRegistration {
        fn release(&self) {
            self.gate.notify_one();
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RegistrationService for GatedRegistration {
        async fn register(
            &self,
            email: &str,
            target_language: Option<TargetLanguage>,
        ) -> Result<RegistrationRecord, RegistrationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(record(email, target_language))
        }
    }

    struct PanickingRegistration;

    #[async_trait]
    impl RegistrationService for PanickingRegistration {
        async fn register(
            &self,
            _email: &str,
            _target_language: Option<TargetLanguage>,
        ) -> Result<RegistrationRecord, RegistrationError> {
            panic!("backend exploded");
        }
    }

    #[tokio::test]
    async fn test_empty_email_never_reaches_service() {
        let mut registration = MockRegistrationService::new();
        registration.expect_register().times(0);

        let workflow = SignupWorkflow::new(
            Arc::new(registration),
            notifier_expecting(Severity::Warning, "Email required"),
        );

        let outcome = workflow.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MissingEmail));
        assert_eq!(workflow.phase(), SubmissionPhase::Idle);
        assert_eq!(workflow.view(), View::Form);
        assert!(!workflow.is_submitting());
    }

    #[tokio::test]
    async fn test_whitespace_email_never_reaches_service() {
        let mut registration = MockRegistrationService::new();
        registration.expect_register().times(0);

        let workflow = SignupWorkflow::new(
            Arc::new(registration),
            notifier_expecting(Severity::Warning, "Email required"),
        );
        workflow.set_email("   ");
        workflow.set_target_language(Some(TargetLanguage::German));

        let outcome = workflow.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MissingEmail));
        assert_eq!(workflow.form().email(), "   ");
    }

    #[tokio::test]
    async fn test_success_moves_to_terminal_view() {
        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .withf(|email, language| {
                email == "user@example.com" && *language == Some(TargetLanguage::Spanish)
            })
            .times(1)
            .returning(|email, language| Ok(record(email, language)));

        let workflow = SignupWorkflow::new(
            Arc::new(registration),
            notifier_expecting(Severity::Info, "Welcome to Lody"),
        );
        workflow.set_email("user@example.com");
        workflow.set_target_language(Some(TargetLanguage::Spanish));

        let outcome = workflow.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Registered(ref r) if r.email == "user@example.com"));
        assert!(matches!(workflow.phase(), SubmissionPhase::Succeeded(_)));
        assert_eq!(workflow.view(), View::Terminal);
        assert!(!workflow.is_submitting());
    }

    #[tokio::test]
    async fn test_failure_returns_to_idle_with_values_kept() {
        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .times(1)
            .returning(|_, _| Err(RegistrationError::Unavailable("down".to_string())));

        let workflow = SignupWorkflow::new(
            Arc::new(registration),
            notifier_expecting(Severity::Error, "Something went wrong"),
        );
        workflow.set_email("user@example.com");

        let outcome = workflow.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(RegistrationError::Unavailable("down".to_string()))
        );
        assert_eq!(workflow.phase(), SubmissionPhase::Idle);
        assert_eq!(workflow.view(), View::Form);
        assert!(!workflow.is_submitting());
        assert_eq!(workflow.form().email(), "user@example.com");
        assert_eq!(workflow.form().target_language(), None);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .times(2)
            .returning(move |email, language| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(RegistrationError::Rejected("try later".to_string()))
                } else {
                    Ok(record(email, language))
                }
            });

        let workflow = SignupWorkflow::new(Arc::new(registration), silent_notifier());
        workflow.set_email("user@example.com");

        assert!(matches!(workflow.submit().await, SubmitOutcome::Failed(_)));
        assert!(matches!(workflow.submit().await, SubmitOutcome::Registered(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(workflow.view(), View::Terminal);
    }

    #[tokio::test]
    async fn test_failure_after_success_returns_to_form() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .times(2)
            .returning(move |email, language| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(record(email, language))
                } else {
                    Err(RegistrationError::Unavailable("down".to_string()))
                }
            });

        let workflow = SignupWorkflow::new(Arc::new(registration), silent_notifier());
        workflow.set_email("user@example.com");

        assert!(matches!(workflow.submit().await, SubmitOutcome::Registered(_)));
        assert_eq!(workflow.view(), View::Terminal);

        assert!(matches!(workflow.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(workflow.phase(), SubmissionPhase::Idle);
        assert_eq!(workflow.view(), View::Form);
        assert_eq!(workflow.form().email(), "user@example.com");
    }

    #[tokio::test]
    async fn test_submit_while_in_flight_is_ignored() {
        let registration = Arc::new(GatedRegistration::default());
        let workflow = SignupWorkflow::new(registration.clone(), silent_notifier());
        workflow.set_email("user@example.com");

        let mut first = tokio_test::task::spawn(workflow.submit());
        tokio_test::assert_pending!(first.poll());

        assert!(workflow.is_submitting());
        assert_eq!(workflow.phase(), SubmissionPhase::Submitting);
        assert_eq!(workflow.view(), View::Form);

        assert_eq!(workflow.submit().await, SubmitOutcome::Ignored);
        assert_eq!(workflow.submit().await, SubmitOutcome::Ignored);

        registration.release();
        let outcome = tokio_test::assert_ready!(first.poll());

        assert!(matches!(outcome, SubmitOutcome::Registered(_)));
        assert_eq!(registration.calls(), 1);
        assert!(!workflow.is_submitting());
    }

    #[tokio::test]
    async fn test_panicking_service_clears_flag() {
        let workflow = SignupWorkflow::new(
            Arc::new(PanickingRegistration),
            notifier_expecting(Severity::Error, "Something went wrong"),
        );
        workflow.set_email("user@example.com");

        let outcome = workflow.submit().await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(RegistrationError::Unavailable(_))
        ));
        assert!(!workflow.is_submitting());
        assert_eq!(workflow.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_timeout_resolves_as_failure() {
        let registration = Arc::new(GatedRegistration::default());
        let workflow = SignupWorkflow::new(
            registration.clone(),
            notifier_expecting(Severity::Error, "Something went wrong"),
        )
        .with_submit_timeout(Some(Duration::from_millis(20)));
        workflow.set_email("user@example.com");

        let outcome = workflow.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed(RegistrationError::TimedOut));
        assert_eq!(registration.calls(), 1);
        assert!(!workflow.is_submitting());
    }

    #[tokio::test]
    async fn test_back_to_form_keeps_values_and_does_not_resubmit() {
        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .times(1)
            .returning(|email, language| Ok(record(email, language)));

        let workflow = SignupWorkflow::new(Arc::new(registration), silent_notifier());
        workflow.set_email("user@example.com");
        workflow.set_target_language(Some(TargetLanguage::Korean));

        workflow.submit().await;
        assert_eq!(workflow.view(), View::Terminal);

        workflow.back_to_form();

        assert_eq!(workflow.phase(), SubmissionPhase::Idle);
        assert_eq!(workflow.view(), View::Form);
        assert_eq!(workflow.form().email(), "user@example.com");
        assert_eq!(workflow.form().target_language(), Some(TargetLanguage::Korean));
    }

    #[tokio::test]
    async fn test_with_form_prefills_values() {
        let mut form = FormState::new();
        form.set_email("pre@filled.io");

        let mut registration = MockRegistrationService::new();
        registration
            .expect_register()
            .withf(|email, _| email == "pre@filled.io")
            .times(1)
            .returning(|email, language| Ok(record(email, language)));

        let workflow =
            SignupWorkflow::new(Arc::new(registration), silent_notifier()).with_form(form);

        assert!(matches!(workflow.submit().await, SubmitOutcome::Registered(_)));
    }
}
