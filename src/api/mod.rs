//! API layer - HTTP endpoints and middleware

pub mod admin;
pub mod health;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod state;
pub mod types;
pub mod v1;

pub use router::{create_router_with_state, with_metrics_endpoint};
pub use state::{AppState, WaitlistServiceTrait};
