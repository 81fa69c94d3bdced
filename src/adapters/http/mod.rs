//! HTTP adapters - REST API implementations.
//!
//! - `assessment` - Assessment endpoints
//! - `middleware` - Bearer token authentication

pub mod assessment;
pub mod middleware;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use assessment::{assessment_router, AssessmentAppState};
pub use middleware::{auth_middleware, AuthState, RequireAuth};

/// GET /health - Liveness check
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the full application router.
///
/// Assessment routes are mounted under `/api` behind the auth middleware;
/// `/health` stays outside it.
pub fn app_router(
    state: AssessmentAppState,
    auth: AuthState,
    request_timeout: Duration,
) -> Router {
    let api = assessment_router()
        .layer(from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
