//! Presentation selector

use serde::Serialize;

use super::controller::SubmissionPhase;

/// The two full-page views of the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Marketing sections and the signup form
    Form,
    /// "You're in!" confirmation
    Terminal,
}

/// Only a successful registration leaves the form.
pub fn select_view(phase: &SubmissionPhase) -> View {
    match phase {
        SubmissionPhase::Succeeded(_) => View::Terminal,
        SubmissionPhase::Idle | SubmissionPhase::Submitting => View::Form,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::waitlist::RegistrationRecord;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_idle_and_submitting_show_form() {
        assert_eq!(select_view(&SubmissionPhase::Idle), View::Form);
        assert_eq!(select_view(&SubmissionPhase::Submitting), View::Form);
    }

    #[test]
    fn test_success_shows_terminal() {
        let record = RegistrationRecord {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            target_language: None,
            created_at: Utc::now(),
            newly_created: true,
        };

        assert_eq!(
            select_view(&SubmissionPhase::Succeeded(record)),
            View::Terminal
        );
    }
}
