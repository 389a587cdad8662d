use serde::{Deserialize, Serialize};

use crate::models::InvoiceResult;

// ============================================================================
// RESPONSE MODELS
// ============================================================================

pub const SUCCESS_MESSAGE: &str = "Factura generada exitosamente";
pub const REJECTED_MESSAGE: &str = "Error al generar la factura";
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";
pub const INVALID_REQUEST_MESSAGE: &str = "Solicitud inválida";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Método no permitido";

/// `200` body: `{ message, facturaId, xmlUrl, pdfUrl }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInvoiceResponse {
    pub message: String,
    #[serde(flatten)]
    pub result: InvoiceResult,
}

impl GenerateInvoiceResponse {
    pub fn success(result: InvoiceResult) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            result,
        }
    }
}

/// Error body: `{ message, error? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
