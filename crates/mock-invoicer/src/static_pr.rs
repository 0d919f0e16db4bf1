//! Static invoicer - hands out one fixed payment request.

use async_trait::async_trait;

use invoice_core::{InvoiceError, InvoiceRequest, Invoicer, PaymentRequest};

/// An invoicer that answers every request with the same payment request.
#[derive(Debug, Clone)]
pub struct StaticInvoicer {
    payment_request: String,
}

impl StaticInvoicer {
    /// Create a new StaticInvoicer returning `payment_request`.
    pub fn new(payment_request: impl Into<String>) -> Self {
        Self {
            payment_request: payment_request.into(),
        }
    }
}

impl Default for StaticInvoicer {
    fn default() -> Self {
        Self::new("lnbc1mockinvoice")
    }
}

#[async_trait]
impl Invoicer for StaticInvoicer {
    async fn create_invoice(
        &self,
        _request: InvoiceRequest,
    ) -> Result<PaymentRequest, InvoiceError> {
        Ok(PaymentRequest::new(self.payment_request.clone()))
    }

    fn name(&self) -> &str {
        "StaticInvoicer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_invoice() {
        let invoicer = StaticInvoicer::new("lnbc500n1abc");
        let pr = invoicer
            .create_invoice(InvoiceRequest::new(50_000, [7; 32], 600))
            .await
            .unwrap();
        assert_eq!(pr.as_str(), "lnbc500n1abc");
    }

    #[tokio::test]
    async fn test_default_payment_request() {
        let pr = StaticInvoicer::default()
            .create_invoice(InvoiceRequest::new(1, [0; 32], 1))
            .await
            .unwrap();
        assert_eq!(pr.as_str(), "lnbc1mockinvoice");
    }

    #[test]
    fn test_invoicer_name() {
        assert_eq!(StaticInvoicer::default().name(), "StaticInvoicer");
    }
}
