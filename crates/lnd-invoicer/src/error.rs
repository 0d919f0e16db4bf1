//! Error types for the LND invoicer.

use invoice_core::InvoiceError;
use thiserror::Error;

/// Errors that can occur when talking to LND.
#[derive(Error, Debug)]
pub enum LndError {
    /// Reading the TLS certificate or macaroon failed.
    #[error("error reading {what} file {path:?}: {source}")]
    ReadFile {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// LND answered with a non-success status.
    #[error("LND returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// LND answered 2xx but the body was not what we expected.
    #[error("unexpected LND response: {0}")]
    InvalidResponse(String),
}

impl From<LndError> for InvoiceError {
    fn from(err: LndError) -> Self {
        match err {
            LndError::Http(e) if e.is_connect() || e.is_timeout() => {
                InvoiceError::Unreachable(e.to_string())
            }
            LndError::Status { status, message } if status == 401 || status == 403 => {
                InvoiceError::Unauthorized(message)
            }
            LndError::InvalidResponse(msg) => InvoiceError::InvalidResponse(msg),
            other => InvoiceError::Backend(other.to_string()),
        }
    }
}
