// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, health_handler};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// API routes only; state and outer layers are attached by `build_app`.
pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
}

/// Full application. With `static_dir` the site is served at `/` and the API
/// routes take precedence; without it `/` is a liveness probe.
pub fn build_app(state: SharedState, static_dir: Option<&Path>) -> Router {
    let router = match static_dir {
        Some(dir) => create_router().fallback_service(ServeDir::new(dir)),
        None => create_router().route("/", get(health_handler)),
    };

    // Any origin, no credentials.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
