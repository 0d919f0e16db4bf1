//! Failing invoicer - every request fails.

use async_trait::async_trait;

use invoice_core::{InvoiceError, InvoiceRequest, Invoicer, PaymentRequest};

/// An invoicer that always fails with a backend error carrying `cause`.
#[derive(Debug, Clone)]
pub struct FailingInvoicer {
    cause: String,
}

impl FailingInvoicer {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

#[async_trait]
impl Invoicer for FailingInvoicer {
    async fn create_invoice(
        &self,
        _request: InvoiceRequest,
    ) -> Result<PaymentRequest, InvoiceError> {
        Err(InvoiceError::Backend(self.cause.clone()))
    }

    fn name(&self) -> &str {
        "FailingInvoicer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails() {
        let invoicer = FailingInvoicer::new("node is offline");
        let err = invoicer
            .create_invoice(InvoiceRequest::new(1_000, [0; 32], 600))
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::Backend(_)));
        assert_eq!(err.to_string(), "backend error: node is offline");
    }
}
