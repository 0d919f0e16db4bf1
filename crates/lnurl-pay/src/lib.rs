//! LNURL-pay and Lightning Address endpoints.
//!
//! For every configured username this crate serves
//!
//! - `GET /.well-known/lnurlp/{username}` - the pay request (discovery)
//! - `GET /pay/callback/{username}?amount=<msat>` - a fresh payment request
//!
//! The metadata array advertised at discovery is serialized exactly once per
//! identity. Its SHA-256 is the description hash of every invoice issued for
//! that identity, so the two can never drift apart.
//!
//! # Example
//!
//! ```ignore
//! let service = LnurlService::new(config, &icon_bytes, Arc::new(invoicer))?;
//! let app: axum::Router = service.router();
//! ```

mod error;
mod identity;
mod metadata;
mod routes;
mod service;
mod state;

pub use error::{ErrorBody, LnurlError, MetadataError, ServiceError};
pub use identity::{Identity, IdentityRegistry, PayRange};
pub use metadata::{Icon, PayMetadata};
pub use routes::callback::PayCallbackResponse;
pub use routes::discovery::PayRequestResponse;
pub use service::{LnurlService, ServiceConfig};
pub use state::{AppState, Settings};
