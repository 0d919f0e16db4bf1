//! The Invoicer trait definition.

use async_trait::async_trait;

use crate::error::InvoiceError;
use crate::request::{InvoiceRequest, PaymentRequest};

/// A source of payment requests.
///
/// Implementations must be safe to share between concurrently running
/// request handlers. This trait is object-safe and is normally held as
/// `Arc<dyn Invoicer>`.
#[async_trait]
pub trait Invoicer: Send + Sync {
    /// Ask the backend for a payment request.
    ///
    /// There is no retry here or in callers; a failure is reported as-is.
    async fn create_invoice(&self, request: InvoiceRequest) -> Result<PaymentRequest, InvoiceError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;
}
