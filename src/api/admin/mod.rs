//! Admin API endpoints, all behind `RequireAdmin`

pub mod waitlist;

use axum::{routing::get, Router};

use super::state::AppState;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", get(waitlist::list_entries))
        .route("/waitlist/stats", get(waitlist::waitlist_stats))
}
