pub mod health;
pub mod invoices;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::state::AppState;

/// All API routes, still waiting for state
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(invoices::create_invoice_router())
}
