use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::config::CertificateConfig;

const PEM_ARMOR_PREFIX: &str = "-----";

/// CSD certificate and private key, read once at startup and shared read-only.
#[derive(Clone)]
pub struct CertificateMaterial {
    /// Base64 DER body of the certificate, exactly as it goes into the SOAP envelope.
    certificate: String,
    private_key: Vec<u8>,
}

impl CertificateMaterial {
    /// Builds the material from an already normalized certificate string.
    pub fn new(certificate: impl Into<String>, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            certificate: certificate.into(),
            private_key: private_key.into(),
        }
    }

    /// Reads certificate and private key from the configured paths.
    ///
    /// Any problem here is a startup fault: the process must not serve requests
    /// without certificate material.
    pub fn load(config: &CertificateConfig) -> Result<Self> {
        let certificate_bytes = read_non_empty(&config.certificate_path)
            .context("No se pudo leer el certificado CSD")?;
        let certificate = normalize_certificate(&certificate_bytes).with_context(|| {
            format!(
                "Invalid certificate in {}",
                config.certificate_path.display()
            )
        })?;

        let private_key = read_non_empty(&config.private_key_path)
            .context("No se pudo leer la llave privada CSD")?;

        info!(
            certificate_path = %config.certificate_path.display(),
            private_key_path = %config.private_key_path.display(),
            "🔐 CSD certificate material loaded"
        );

        Ok(Self {
            certificate,
            private_key,
        })
    }

    pub fn certificate(&self) -> &str {
        &self.certificate
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for CertificateMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateMaterial")
            .field("certificate_len", &self.certificate.len())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

fn read_non_empty(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("{} is empty", path.display());
    }
    Ok(bytes)
}

/// Turns a `.cer` file into the base64 DER string used as binary security token.
///
/// PEM input keeps its base64 body (armor and line breaks removed); raw DER is encoded.
fn normalize_certificate(bytes: &[u8]) -> Result<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.trim_start().starts_with(PEM_ARMOR_PREFIX) => {
            let body: String = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with(PEM_ARMOR_PREFIX))
                .collect();

            if body.is_empty() {
                anyhow::bail!("PEM certificate has no body");
            }
            general_purpose::STANDARD
                .decode(&body)
                .context("PEM certificate body is not valid base64")?;

            Ok(body)
        }
        _ => Ok(general_purpose::STANDARD.encode(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    fn cert_config(certificate: &NamedTempFile, key: &NamedTempFile) -> CertificateConfig {
        CertificateConfig {
            certificate_path: certificate.path().to_path_buf(),
            private_key_path: key.path().to_path_buf(),
        }
    }

    #[test]
    fn test_pem_certificate_keeps_base64_body() {
        let certificate = temp_file(
            b"-----BEGIN CERTIFICATE-----\nTUlJQ2VU\nQ0NBYm1n\n-----END CERTIFICATE-----\n",
        );
        let key = temp_file(b"private-key-bytes");

        let material = CertificateMaterial::load(&cert_config(&certificate, &key)).unwrap();

        assert_eq!(material.certificate(), "TUlJQ2VUQ0NBYm1n");
        assert_eq!(material.private_key(), b"private-key-bytes");
    }

    #[test]
    fn test_der_certificate_is_base64_encoded() {
        let der = [0x30u8, 0x82, 0x01, 0x0a, 0xff, 0x00];
        let certificate = temp_file(&der);
        let key = temp_file(&[0x30, 0x82]);

        let material = CertificateMaterial::load(&cert_config(&certificate, &key)).unwrap();

        assert_eq!(material.certificate(), general_purpose::STANDARD.encode(der));
    }

    #[test]
    fn test_missing_files_fail_at_load() {
        let key = temp_file(b"key");
        let config = CertificateConfig {
            certificate_path: PathBuf::from("/definitely/not/here.cer"),
            private_key_path: key.path().to_path_buf(),
        };

        assert!(CertificateMaterial::load(&config).is_err());
    }

    #[test]
    fn test_empty_files_fail_at_load() {
        let certificate = temp_file(b"");
        let key = temp_file(b"key");

        assert!(CertificateMaterial::load(&cert_config(&certificate, &key)).is_err());

        let certificate = temp_file(b"-----BEGIN CERTIFICATE-----\n-----END CERTIFICATE-----\n");
        assert!(CertificateMaterial::load(&cert_config(&certificate, &key)).is_err());
    }

    #[test]
    fn test_pem_with_invalid_body_is_rejected() {
        let certificate = temp_file(b"-----BEGIN CERTIFICATE-----\nnot base64 !!\n-----END CERTIFICATE-----\n");
        let key = temp_file(b"key");

        assert!(CertificateMaterial::load(&cert_config(&certificate, &key)).is_err());
    }

    #[test]
    fn test_debug_never_prints_key() {
        let material = CertificateMaterial::new("QUJD", b"super-secret".to_vec());
        let debug = format!("{:?}", material);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
