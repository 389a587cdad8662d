// ============================================================================
// SAT AUTHENTICATION SERVICE
// ============================================================================
// Exchanges the CSD certificate for a bearer token through the SOAP surface.
// One attempt per call: no caching, no retries.
// ============================================================================

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::AuthToken;
use crate::processing::soap::{build_security_envelope, parse_token, TokenParseError};
use crate::security::CertificateMaterial;

#[derive(Error, Debug)]
pub enum SatAuthError {
    #[error("Error en la autenticación con el SAT (HTTP {status})")]
    Rejected { status: StatusCode },

    #[error("No se pudo construir el sobre SOAP: {0}")]
    Envelope(#[from] std::io::Error),

    #[error("Error de red al autenticar con el SAT: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Token(#[from] TokenParseError),
}

#[derive(Clone)]
pub struct SatAuthService {
    client: Client,
    auth_url: String,
    certificate: Arc<CertificateMaterial>,
}

impl SatAuthService {
    pub fn new(client: Client, auth_url: impl Into<String>, certificate: Arc<CertificateMaterial>) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
            certificate,
        }
    }

    /// Sends the security envelope and extracts the token from the XML reply.
    pub async fn authenticate(&self, request_id: &str) -> Result<AuthToken, SatAuthError> {
        let envelope = build_security_envelope(self.certificate.certificate())?;

        debug!(
            request_id = %request_id,
            auth_url = %self.auth_url,
            envelope_len = envelope.len(),
            "🔑 Sending SAT authentication envelope"
        );

        let response = self
            .client
            .post(&self.auth_url)
            .header(CONTENT_TYPE, "application/xml")
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(
                request_id = %request_id,
                status = %status,
                "❌ SAT rejected the authentication request"
            );
            return Err(SatAuthError::Rejected { status });
        }

        let body = response.text().await?;
        let token = parse_token(&body).map_err(|e| {
            error!(request_id = %request_id, error = %e, "❌ No token in SAT authentication response");
            e
        })?;

        info!(request_id = %request_id, "✅ SAT authentication succeeded");

        Ok(AuthToken::new(token))
    }
}
