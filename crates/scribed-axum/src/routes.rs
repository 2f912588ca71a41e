//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::bootstrap::{AppContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Create the panel router with all routes wired to handlers.
pub fn create_router(ctx: AppContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/sources", get(handlers::sources::list))
        .route("/settings", post(handlers::settings::update))
        .route("/start", post(handlers::control::start))
        .route("/stop", post(handlers::control::stop))
        .route("/status", get(handlers::control::status))
        .route("/logs", get(handlers::logs::stream))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
