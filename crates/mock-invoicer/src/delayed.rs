//! Delayed invoicer - wraps another invoicer with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use invoice_core::{InvoiceError, InvoiceRequest, Invoicer, PaymentRequest};

/// An invoicer that waits before delegating to its inner invoicer.
///
/// Useful for exercising concurrent callbacks and request timeouts.
pub struct DelayedInvoicer<I: Invoicer> {
    inner: I,
    delay: Duration,
}

impl<I: Invoicer> DelayedInvoicer<I> {
    pub fn new(inner: I, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn with_millis(inner: I, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<I: Invoicer> Invoicer for DelayedInvoicer<I> {
    async fn create_invoice(
        &self,
        request: InvoiceRequest,
    ) -> Result<PaymentRequest, InvoiceError> {
        sleep(self.delay).await;
        self.inner.create_invoice(request).await
    }

    fn name(&self) -> &str {
        "DelayedInvoicer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticInvoicer;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_invoicer() {
        let invoicer = DelayedInvoicer::with_millis(StaticInvoicer::new("lnbc1slow"), 50);

        let start = Instant::now();
        let pr = invoicer
            .create_invoice(InvoiceRequest::new(1_000, [0; 32], 60))
            .await
            .unwrap();

        assert_eq!(pr.as_str(), "lnbc1slow");
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
