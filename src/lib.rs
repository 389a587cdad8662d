use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod models;
pub mod processing;
pub mod security;
pub mod services;
pub mod state;

use api::create_api_router;
use security::{get_cors_layer, security_headers_middleware};
use state::AppState;

use axum::middleware as axum_middleware;

pub fn create_app_router(app_state: Arc<AppState>) -> Router {
    let static_dir = app_state.config.server.static_dir.clone();
    let cors_layer = get_cors_layer(&app_state.config.server.cors_allowed_origins);

    Router::new()
        // API endpoints con estado
        .merge(create_api_router())
        // Formulario de facturación (index.html + script.js)
        .fallback_service(ServeDir::new(static_dir))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(axum_middleware::from_fn(security_headers_middleware))
}
