//! Core trait and types for invoice backends.
//!
//! This crate provides the shared interface between the LNURL-pay service
//! and whatever node actually issues payment requests. It defines:
//!
//! - [`Invoicer`] - The trait that all invoice backends must implement
//! - [`InvoiceRequest`] / [`PaymentRequest`] - Input and output of a backend call
//! - [`InvoiceError`] - Error types for backend operations
//!
//! # Example
//!
//! ```rust
//! use invoice_core::{Invoicer, InvoiceError, InvoiceRequest, PaymentRequest};
//! use async_trait::async_trait;
//!
//! struct FixedInvoicer;
//!
//! #[async_trait]
//! impl Invoicer for FixedInvoicer {
//!     async fn create_invoice(
//!         &self,
//!         _request: InvoiceRequest,
//!     ) -> Result<PaymentRequest, InvoiceError> {
//!         Ok(PaymentRequest::new("lnbc1..."))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FixedInvoicer"
//!     }
//! }
//! ```

mod error;
mod request;
mod trait_def;

pub use error::InvoiceError;
pub use request::{DescriptionHash, InvoiceRequest, PaymentRequest};
pub use trait_def::Invoicer;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
