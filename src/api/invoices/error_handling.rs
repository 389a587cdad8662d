use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::api::invoices::models::{
    ErrorResponse, INTERNAL_ERROR_MESSAGE, INVALID_REQUEST_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
    REJECTED_MESSAGE,
};
use crate::services::{SatAuthError, SatInvoiceError};

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Error, Debug)]
pub enum InvoiceGenerationError {
    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: Method },

    #[error("{message}")]
    InvalidRequest { message: String },

    /// SAT answered the invoicing call with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or("SAT rechazó la factura"))]
    Rejected { message: Option<String> },

    #[error(transparent)]
    Authentication(#[from] SatAuthError),

    /// Network faults and malformed SAT responses.
    #[error(transparent)]
    Internal(SatInvoiceError),
}

impl From<SatInvoiceError> for InvoiceGenerationError {
    fn from(err: SatInvoiceError) -> Self {
        match err {
            SatInvoiceError::Rejected { message, .. } => InvoiceGenerationError::Rejected { message },
            other => InvoiceGenerationError::Internal(other),
        }
    }
}

impl InvoiceGenerationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceGenerationError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            InvoiceGenerationError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            InvoiceGenerationError::Rejected { .. } => StatusCode::BAD_REQUEST,
            InvoiceGenerationError::Authentication(_) => StatusCode::INTERNAL_SERVER_ERROR,
            InvoiceGenerationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ============================================================================
// HTTP RESPONSE CONVERSION
// ============================================================================

impl IntoResponse for InvoiceGenerationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            InvoiceGenerationError::MethodNotAllowed { .. } => ErrorResponse {
                message: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
                error: None,
            },
            InvoiceGenerationError::InvalidRequest { message } => ErrorResponse {
                message: INVALID_REQUEST_MESSAGE.to_string(),
                error: Some(message.clone()),
            },
            InvoiceGenerationError::Rejected { message } => ErrorResponse {
                message: REJECTED_MESSAGE.to_string(),
                error: message.clone(),
            },
            InvoiceGenerationError::Authentication(_) | InvoiceGenerationError::Internal(_) => {
                error!("Error al generar la factura: {}", self);
                ErrorResponse {
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                    error: Some(self.to_string()),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
