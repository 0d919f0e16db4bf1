//! Error types for the LNURL-pay service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use invoice_core::InvoiceError;
use serde::Serialize;
use thiserror::Error;

/// Errors building the metadata array.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The icon bytes are not an image we can decode.
    #[error("invalid icon_file content: {0}")]
    InvalidIcon(String),

    /// Re-encoding the icon as PNG failed.
    #[error("cannot encode icon as PNG: {0}")]
    Encode(String),
}

/// Errors assembling the service from configuration.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("invalid url_authority {0:?}: {1}")]
    InvalidAuthority(String, String),

    #[error("duplicate username {0:?}")]
    DuplicateUsername(String),

    #[error("no usernames configured")]
    NoIdentities,
}

/// Per-request errors, rendered in the LNURL error shape.
#[derive(Debug, Error)]
pub enum LnurlError {
    /// No identity with this username. Rendered as a bare 404.
    #[error("unknown username {0:?}")]
    UnknownUser(String),

    /// `amount` missing, non-numeric or not representable.
    #[error("cannot parse amount: {0}")]
    MalformedAmount(String),

    /// `amount` outside `[minSendable, maxSendable]`.
    #[error("amount is out of acceptable range")]
    AmountOutOfRange {
        amount_msat: u64,
        min_msat: u64,
        max_msat: u64,
    },

    /// The invoice backend failed.
    #[error("error constructing invoice: {0}")]
    Backend(#[from] InvoiceError),
}

impl LnurlError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LnurlError::UnknownUser(_) => StatusCode::NOT_FOUND,
            LnurlError::MalformedAmount(_) | LnurlError::AmountOutOfRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            LnurlError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"status":"ERROR","reason":...}` as defined by LUD-06.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub reason: String,
}

impl ErrorBody {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            status: "ERROR",
            reason: reason.into(),
        }
    }
}

impl IntoResponse for LnurlError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            LnurlError::UnknownUser(username) => {
                tracing::debug!(username = %username, "Unknown username");
                return status.into_response();
            }
            LnurlError::MalformedAmount(_) | LnurlError::AmountOutOfRange { .. } => {
                tracing::warn!(error = %self, "Rejected callback");
            }
            LnurlError::Backend(err) => {
                tracing::error!(error = %err, "Invoice backend failed");
            }
        }

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
