//! HTTP endpoints

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::websocket::ws_handler;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let ws_path = state.config.server.ws_path.clone();

    Router::new()
        // Streaming intake + broadcast
        .route(&ws_path, get(ws_handler))
        // Liveness: fixed payload, no side effects
        .route("/status", get(status))
        // Readiness with active connection count
        .route("/ready", get(readiness))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn status() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "connections": state.registry.count(),
    }))
}
