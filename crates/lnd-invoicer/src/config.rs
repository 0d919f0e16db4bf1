//! Connection settings for an LND node.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::LndError;

/// Request timeout used when none is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for the LND REST connection.
#[derive(Clone)]
pub struct LndConfig {
    /// `host:port` of LND's REST listener.
    pub host: String,
    /// PEM certificate trusted as the only root for the connection.
    /// `None` means plain HTTP.
    pub tls_cert_pem: Option<Vec<u8>>,
    /// Per-request timeout.
    pub http_timeout: Duration,
    /// Hex-encoded macaroon.
    macaroon_hex: SecretString,
}

impl LndConfig {
    /// Create a configuration from in-memory values.
    pub fn new(host: impl Into<String>, tls_cert_pem: Option<Vec<u8>>, macaroon: &[u8]) -> Self {
        Self {
            host: host.into(),
            tls_cert_pem,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            macaroon_hex: SecretString::from(hex::encode(macaroon)),
        }
    }

    /// Load the certificate and macaroon from disk.
    ///
    /// `tls_cert_file` may only be omitted when `allow_plaintext` is set.
    pub fn from_files(
        host: impl Into<String>,
        tls_cert_file: Option<&Path>,
        macaroon_file: &Path,
        allow_plaintext: bool,
    ) -> Result<Self, LndError> {
        let tls_cert_pem = match tls_cert_file {
            Some(path) => Some(read_file("cert", path)?),
            None if allow_plaintext => None,
            None => {
                return Err(LndError::Config(
                    "a TLS certificate is required unless plaintext is explicitly allowed"
                        .to_string(),
                ))
            }
        };

        let macaroon = read_file("macaroon", macaroon_file)?;

        Ok(Self::new(host, tls_cert_pem, &macaroon))
    }

    /// Builder method to set the request timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Base URL of the REST API.
    pub fn base_url(&self) -> String {
        let scheme = if self.tls_cert_pem.is_some() { "https" } else { "http" };
        format!("{}://{}", scheme, self.host.trim_end_matches('/'))
    }

    /// Get the invoices endpoint URL.
    pub fn invoices_url(&self) -> String {
        format!("{}/v1/invoices", self.base_url())
    }

    /// Get the macaroon (exposes the secret).
    pub(crate) fn macaroon_hex(&self) -> &str {
        self.macaroon_hex.expose_secret()
    }
}

impl fmt::Debug for LndConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LndConfig")
            .field("host", &self.host)
            .field("tls", &self.tls_cert_pem.is_some())
            .field("http_timeout", &self.http_timeout)
            .finish_non_exhaustive()
    }
}

fn read_file(what: &'static str, path: &Path) -> Result<Vec<u8>, LndError> {
    std::fs::read(path).map_err(|source| LndError::ReadFile {
        what,
        path: path.display().to_string(),
        source,
    })
}
