//! `POST /v1/waitlist`

use axum::{extract::State, http::StatusCode};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, JoinRequest, Json};
use crate::domain::waitlist::{redact_email, RegistrationRecord};

/// Registers against the local waitlist.
/// 201 for a new entry, 200 when the address was already listed.
pub async fn join_waitlist(
    State(state): State<AppState>,
    Json(request): Json<JoinRequest>,
) -> Result<(StatusCode, Json<RegistrationRecord>), ApiError> {
    let target_language = request.target_language()?;

    debug!(email = %redact_email(&request.email), "API waitlist registration");

    let record = state
        .waitlist_service
        .register(&request.email, target_language)
        .await?;

    let status = if record.newly_created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(record)))
}
