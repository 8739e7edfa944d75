//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`, plus `/health` at the root.
//! Middleware: permissive CORS, request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        // Static segment registered alongside the parameterized route;
        // axum gives it priority.
        .route("/channels/search", get(handlers::channel::search_channels))
        .route(
            "/channels/{identifier}",
            get(handlers::channel::get_channel),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversation::get_conversation),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
