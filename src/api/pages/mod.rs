//! Server-rendered landing page
//!
//! Each POST builds a fresh `SignupWorkflow` from the submitted values, runs
//! one submit and renders whichever view the workflow ends in.

mod render;

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::state::AppState;
use crate::domain::signup::{FormState, SignupWorkflow, View};
use crate::domain::waitlist::TargetLanguage;
use crate::infrastructure::notification::NotificationBuffer;
use crate::infrastructure::observability::record_signup_outcome;

pub use render::{escape_html, form_page, terminal_page};

/// Fields posted by the landing page form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub target_language: Option<String>,
}

pub fn create_pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_page))
        .route("/waitlist", post(join_waitlist))
}

/// GET /
pub async fn landing_page() -> Html<String> {
    Html(form_page(&FormState::new(), &[]))
}

/// POST /waitlist
pub async fn join_waitlist(State(state): State<AppState>, Form(form): Form<JoinForm>) -> Html<String> {
    let target_language = TargetLanguage::parse_optional(form.target_language.as_deref())
        .unwrap_or_else(|e| {
            debug!(error = %e, "Ignoring unknown target language from form");
            None
        });

    let mut values = FormState::new();
    values.set_email(form.email);
    values.set_target_language(target_language);

    let notifications = Arc::new(NotificationBuffer::new());
    let workflow = SignupWorkflow::new(state.registration.clone(), notifications.clone())
        .with_submit_timeout(state.submit_timeout)
        .with_form(values);

    let outcome = workflow.submit().await;
    record_signup_outcome(outcome.label());

    let toasts = notifications.drain();

    let page = match workflow.view() {
        View::Terminal => terminal_page(&toasts),
        View::Form => form_page(&workflow.form(), &toasts),
    };

    Html(page)
}
