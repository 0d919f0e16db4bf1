//! Mock invoice backends for the LNURL-pay service.
//!
//! This crate provides mock implementations of the `Invoicer` trait for testing:
//! - `StaticInvoicer` - Always returns the same payment request
//! - `FailingInvoicer` - Always fails with a configured cause
//! - `RecordingInvoicer` - Wraps another invoicer and records every request
//! - `DelayedInvoicer` - Wraps another invoicer with artificial delay
//!
//! For a real node, use the `lnd-invoicer` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_invoicer::{InvoiceRequest, Invoicer, RecordingInvoicer, StaticInvoicer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_invoicer::InvoiceError> {
//!     let invoicer = RecordingInvoicer::new(StaticInvoicer::new("lnbc1mock"));
//!
//!     let pr = invoicer.create_invoice(InvoiceRequest::new(1_000, [0; 32], 600)).await?;
//!     assert_eq!(pr.as_str(), "lnbc1mock");
//!     assert_eq!(invoicer.requests().len(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod recording;
mod static_pr;

// Re-export invoice-core types for convenience
pub use invoice_core::{async_trait, InvoiceError, InvoiceRequest, Invoicer, PaymentRequest};

pub use delayed::DelayedInvoicer;
pub use failing::FailingInvoicer;
pub use recording::RecordingInvoicer;
pub use static_pr::StaticInvoicer;
