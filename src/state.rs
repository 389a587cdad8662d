use anyhow::Context;
use reqwest::Client as ReqwestClient;
use std::sync::Arc;

use crate::config::Config;
use crate::security::CertificateMaterial;
use crate::services::{SatAuthService, SatInvoiceService};

/// Estado compartido de la aplicación.
/// Built once at startup; handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sat_auth_service: SatAuthService,
    pub sat_invoice_service: SatInvoiceService,
}

impl AppState {
    /// Resolves configuration from the environment and loads the CSD files.
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let certificate = CertificateMaterial::load(&config.certificates)?;

        tracing::info!(
            environment = %config.sat.environment,
            api_url = %config.sat.api_url,
            auth_url = %config.sat.auth_url,
            "⚙️ SAT configuration resolved"
        );

        Self::with_certificate(config, certificate)
    }

    /// Builds the state from already resolved parts.
    pub fn with_certificate(config: Config, certificate: CertificateMaterial) -> anyhow::Result<Self> {
        let mut builder = ReqwestClient::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.sat.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to build Reqwest client")?;

        let sat_auth_service = SatAuthService::new(
            http_client.clone(),
            config.sat.auth_url.clone(),
            Arc::new(certificate),
        );
        let sat_invoice_service = SatInvoiceService::new(http_client, config.sat.api_url.clone());

        Ok(AppState {
            config,
            sat_auth_service,
            sat_invoice_service,
        })
    }
}
