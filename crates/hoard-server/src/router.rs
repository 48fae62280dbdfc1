use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the HTTP router.
///
/// Upload bodies are read by the handler itself, bounded by
/// `AppState::body_limit`, once the path identifier has been checked.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/lbp/upload/:hash", post(handler::upload_asset))
        .route("/lbp/r/:hash", get(handler::retrieve_asset))
        .route("/api/v3/assets/:hash", get(handler::describe_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
