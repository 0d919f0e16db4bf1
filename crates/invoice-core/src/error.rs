//! Error types for invoice backends.

use thiserror::Error;

/// Errors that can occur while asking a backend for a payment request.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend rejected our credentials.
    #[error("backend rejected credentials: {0}")]
    Unauthorized(String),

    /// The backend answered with an error of its own.
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend answered with something we could not interpret.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),
}
