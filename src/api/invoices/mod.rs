// Invoice generation API
// Relays invoice creation to SAT (authentication + CFDI submission)

pub mod error_handling;
pub mod handlers;
pub mod models;

pub use error_handling::*;
pub use handlers::*;
pub use models::*;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::state::AppState;

/// Create the invoice generation router
pub fn create_invoice_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/generateInvoice",
        post(generate_invoice_handler).fallback(method_not_allowed_handler),
    )
}
