//! Configuration management for the SAT invoice relay.
//!
//! Everything the service reads from the process environment is resolved here,
//! once, at startup. Business code only ever sees the resulting [`Config`].

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// SAT environment the relay talks to.
///
/// - `Sandbox`: test invoices, used by the browser form.
/// - `Production`: live CFDI issuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SatEnvironment {
    #[default]
    Sandbox,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentParseError {
    #[error("invalid SAT environment: {input} (expected 'sandbox' or 'production')")]
    Invalid { input: String },
}

impl FromStr for SatEnvironment {
    type Err = EnvironmentParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "pruebas" => Ok(SatEnvironment::Sandbox),
            "production" | "produccion" => Ok(SatEnvironment::Production),
            _ => Err(EnvironmentParseError::Invalid {
                input: value.to_string(),
            }),
        }
    }
}

impl SatEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            SatEnvironment::Sandbox => "sandbox",
            SatEnvironment::Production => "production",
        }
    }

    /// Default CFDI invoicing endpoint.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            SatEnvironment::Sandbox => "https://pruebacfdi.facturaelectronica.sat.gob.mx",
            SatEnvironment::Production => "https://portalcfdi.facturaelectronica.sat.gob.mx",
        }
    }

    /// Default authentication endpoint.
    pub fn default_auth_url(&self) -> &'static str {
        match self {
            SatEnvironment::Sandbox => "https://pruebacfdiau.sat.gob.mx",
            SatEnvironment::Production => "https://cfdiau.sat.gob.mx",
        }
    }

    pub fn default_certificate_path(&self) -> PathBuf {
        PathBuf::from(format!("certs/{}/csd.cer", self.as_str()))
    }

    pub fn default_private_key_path(&self) -> PathBuf {
        PathBuf::from(format!("certs/{}/csd.key", self.as_str()))
    }
}

impl fmt::Display for SatEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sat: SatConfig,
    pub certificates: CertificateConfig,
    pub server: ServerConfig,
}

#[derive(Clone)]
pub struct SatConfig {
    pub environment: SatEnvironment,
    pub api_url: String,
    pub auth_url: String,
    /// Passphrase of the CSD private key. Loaded for completeness, nothing signs with it yet.
    pub csd_password: Option<String>,
    /// `None` means outbound calls may wait forever.
    pub http_timeout: Option<Duration>,
}

// Keep the passphrase out of logs.
impl fmt::Debug for SatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SatConfig")
            .field("environment", &self.environment)
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .field("csd_password", &self.csd_password.as_ref().map(|_| "<redacted>"))
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CertificateConfig {
    pub certificate_path: PathBuf,
    pub private_key_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Resolves the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, same as a missing variable
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = match var("SAT_ENVIRONMENT") {
            Some(raw) => raw.parse::<SatEnvironment>()?,
            None => SatEnvironment::default(),
        };

        let http_timeout = match var("SAT_HTTP_TIMEOUT_SECONDS") {
            Some(raw) => {
                let seconds: u64 = raw.trim().parse().map_err(|e| {
                    anyhow::anyhow!("SAT_HTTP_TIMEOUT_SECONDS must be a whole number of seconds: {}", e)
                })?;
                Some(Duration::from_secs(seconds))
            }
            None => None,
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            None => 8000,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            sat: SatConfig {
                environment,
                api_url: var("SAT_API_URL")
                    .unwrap_or_else(|| environment.default_api_url().to_string()),
                auth_url: var("SAT_AUTH_URL")
                    .unwrap_or_else(|| environment.default_auth_url().to_string()),
                csd_password: var("CSD_PASSWORD"),
                http_timeout,
            },
            certificates: CertificateConfig {
                certificate_path: var("CSD_CERTIFICATE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| environment.default_certificate_path()),
                private_key_path: var("CSD_PRIVATE_KEY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| environment.default_private_key_path()),
            },
            server: ServerConfig {
                port,
                static_dir: var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("static")),
                cors_allowed_origins,
            },
        })
    }
}
