//! Recording invoicer - remembers every request it forwards.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use invoice_core::{InvoiceError, InvoiceRequest, Invoicer, PaymentRequest};

/// Wraps another invoicer and records every request passed through it.
///
/// Clones share the same log, so a test can keep one handle while the
/// service under test owns another.
#[derive(Debug)]
pub struct RecordingInvoicer<I: Invoicer> {
    inner: Arc<I>,
    requests: Arc<Mutex<Vec<InvoiceRequest>>>,
}

impl<I: Invoicer> RecordingInvoicer<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner: Arc::new(inner),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<InvoiceRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<InvoiceRequest> {
        self.requests().last().copied()
    }
}

impl<I: Invoicer> Clone for RecordingInvoicer<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            requests: Arc::clone(&self.requests),
        }
    }
}

#[async_trait]
impl<I: Invoicer> Invoicer for RecordingInvoicer<I> {
    async fn create_invoice(
        &self,
        request: InvoiceRequest,
    ) -> Result<PaymentRequest, InvoiceError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }
        self.inner.create_invoice(request).await
    }

    fn name(&self) -> &str {
        "RecordingInvoicer"
    }
}
