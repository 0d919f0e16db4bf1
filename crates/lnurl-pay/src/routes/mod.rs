//! Route handlers for the LNURL-pay service.

pub mod callback;
pub mod discovery;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // LUD-06 / LUD-16
        .route("/.well-known/lnurlp/:username", get(discovery::pay_request))
        .route("/pay/callback/:username", get(callback::pay_callback))
        // Health check
        .route("/health", get(health::health))
}
