//! # LND Invoicer
//!
//! An [`Invoicer`](invoice_core::Invoicer) backed by an LND node's REST API.
//!
//! Only invoice creation is exposed. The LNURL-pay service never needs to
//! pay, so nothing here can move funds out of the node; an invoice-only
//! macaroon is all it requires.
//!
//! ```ignore
//! let config = LndConfig::from_files(
//!     "127.0.0.1:8080",
//!     Some(Path::new("tls.cert")),
//!     Path::new("invoice.macaroon"),
//!     false,
//! )?;
//! let invoicer = LndInvoicer::new(config)?;
//! let pr = invoicer.create_invoice(InvoiceRequest::new(500_000, hash, 600)).await?;
//! ```

mod config;
mod error;
mod invoicer;

pub use config::{LndConfig, DEFAULT_HTTP_TIMEOUT};
pub use error::LndError;
pub use invoicer::LndInvoicer;
