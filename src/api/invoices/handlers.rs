use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    Json,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::invoices::{
    error_handling::InvoiceGenerationError,
    models::GenerateInvoiceResponse,
};
use crate::models::InvoiceRequest;
use crate::state::AppState;

// ============================================================================
// HANDLER FUNCTIONS
// ============================================================================

/// Main endpoint: POST /api/generateInvoice
///
/// Authenticates against SAT with the CSD certificate, then submits the
/// invoice with the obtained token. Exactly one attempt per request.
pub async fn generate_invoice_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<InvoiceRequest>, JsonRejection>,
) -> Result<Json<GenerateInvoiceResponse>, InvoiceGenerationError> {
    let request_id = Uuid::new_v4().to_string();

    let Json(invoice) = payload.map_err(|rejection| {
        warn!(request_id = %request_id, error = %rejection.body_text(), "⚠️ Invalid invoice request body");
        InvoiceGenerationError::InvalidRequest {
            message: rejection.body_text(),
        }
    })?;

    info!(
        request_id = %request_id,
        environment = %app_state.config.sat.environment,
        "📨 Invoice generation requested"
    );

    // 1. AUTHENTICATION
    debug!(request_id = %request_id, "Phase 1: authenticating with SAT");
    let token = app_state.sat_auth_service.authenticate(&request_id).await?;

    // 2. INVOICING
    debug!(request_id = %request_id, "Phase 2: submitting invoice");
    let result = app_state
        .sat_invoice_service
        .submit(&token, &invoice, &request_id)
        .await?;

    info!(
        request_id = %request_id,
        factura_id = %result.invoice_id,
        "🎉 Invoice generation completed"
    );

    Ok(Json(GenerateInvoiceResponse::success(result)))
}

/// Anything but POST on the invoice route.
pub async fn method_not_allowed_handler(method: Method) -> InvoiceGenerationError {
    warn!("🚫 {} not allowed on invoice endpoint", method);
    InvoiceGenerationError::MethodNotAllowed { method }
}
