//! Public JSON API

pub mod waitlist;

use axum::{routing::post, Router};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/waitlist", post(waitlist::join_waitlist))
}
