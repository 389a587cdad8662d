// ============================================================================
// SAT INVOICING SERVICE
// ============================================================================
// Submits one invoice to the SAT REST surface using a bearer token.
// ============================================================================

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::{AuthToken, InvoiceRequest, InvoiceResult};

#[derive(Error, Debug)]
pub enum SatInvoiceError {
    /// SAT answered with a non-success status and a JSON body; `message` is what SAT said.
    #[error("SAT rechazó la factura (HTTP {status}): {}", .message.as_deref().unwrap_or("sin mensaje"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Respuesta inválida del SAT: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Error de red al enviar la factura al SAT: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct SatInvoiceService {
    client: Client,
    api_url: String,
}

impl SatInvoiceService {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    pub async fn submit(
        &self,
        token: &AuthToken,
        invoice: &InvoiceRequest,
        request_id: &str,
    ) -> Result<InvoiceResult, SatInvoiceError> {
        info!(
            request_id = %request_id,
            issuer = %invoice.issuer_tax_id,
            receiver = %invoice.receiver_tax_id,
            amount = %invoice.amount,
            "🧾 Submitting invoice to SAT"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token.as_str())
            .json(invoice)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // A failure body that is not JSON is a malformed response, not a rejection
            let message = rejection_message(&body).map_err(|e| {
                error!(
                    request_id = %request_id,
                    status = %status,
                    error = %e,
                    "❌ SAT failure response is not JSON"
                );
                e
            })?;
            warn!(
                request_id = %request_id,
                status = %status,
                message = ?message,
                "⚠️ SAT rejected the invoice"
            );
            return Err(SatInvoiceError::Rejected { status, message });
        }

        let result: InvoiceResult = serde_json::from_str(&body).map_err(|e| {
            error!(request_id = %request_id, error = %e, "❌ Unexpected SAT invoice response");
            e
        })?;

        info!(
            request_id = %request_id,
            factura_id = %result.invoice_id,
            "✅ SAT generated the invoice"
        );

        Ok(result)
    }
}

/// SAT's `message` field from a JSON failure body, `None` when SAT sent none.
fn rejection_message(body: &str) -> Result<Option<String>, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;

    Ok(match value.get("message") {
        None | Some(Value::Null) => None,
        Some(Value::String(message)) => Some(message.clone()),
        Some(other) => Some(other.to_string()),
    })
}
