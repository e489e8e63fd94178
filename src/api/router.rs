use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::admin;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::pages;
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Form posts and JSON bodies are tiny
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    let v1_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Landing page and form post
        .merge(pages::create_pages_router())
        // Registration API, callable from other origins
        .nest("/v1", v1::create_v1_router().layer(v1_cors))
        // Admin API
        .nest("/admin", admin::create_admin_router())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Mount the Prometheus endpoint when metrics are enabled
pub fn with_metrics_endpoint(
    router: Router,
    metrics: Option<PrometheusMetrics>,
    path: &str,
) -> Router {
    match metrics {
        Some(m) => router.merge(create_metrics_router(m, path)),
        None => router,
    }
}
