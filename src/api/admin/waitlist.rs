//! Waitlist admin endpoints

use axum::extract::{Query, State};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, WaitlistListParams, WaitlistListResponse};
use crate::domain::waitlist::{WaitlistQuery, WaitlistStats};

/// GET /admin/waitlist
pub async fn list_entries(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<WaitlistListParams>,
) -> Result<Json<WaitlistListResponse>, ApiError> {
    let query = params.to_query()?;

    debug!(
        limit = params.limit(),
        offset = params.offset(),
        language = ?query.language,
        "Admin listing waitlist"
    );

    let entries = state.waitlist_service.list(&query).await?;

    // Total ignores pagination but keeps the language filter
    let count_query = WaitlistQuery {
        language: query.language,
        ..Default::default()
    };
    let total = state.waitlist_service.count(&count_query).await?;

    Ok(Json(WaitlistListResponse::new(entries, total, &params)))
}

/// GET /admin/waitlist/stats
pub async fn waitlist_stats(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<WaitlistStats>, ApiError> {
    let stats = state.waitlist_service.stats().await?;
    Ok(Json(stats))
}
