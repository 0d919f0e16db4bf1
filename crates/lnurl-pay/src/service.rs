//! Service assembly: configuration in, router out.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use invoice_core::Invoicer;
use tracing::info;
use url::Url;

use crate::error::ServiceError;
use crate::identity::{Identity, IdentityRegistry, PayRange};
use crate::metadata::Icon;
use crate::routes;
use crate::state::{AppState, Settings};

/// Everything the service reads from configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Public base URL, e.g. `https://example.com`.
    pub url_authority: String,
    /// `text/plain` metadata entry.
    pub short_description: String,
    pub pay_range: PayRange,
    pub invoice_expiry: Duration,
    pub usernames: Vec<String>,
}

/// A fully assembled LNURL-pay service.
#[derive(Clone)]
pub struct LnurlService {
    state: AppState,
}

impl LnurlService {
    /// Decode the icon, build every identity's metadata and bind the invoicer.
    ///
    /// All metadata is computed here, once.
    pub fn new(
        config: ServiceConfig,
        icon_bytes: &[u8],
        invoicer: Arc<dyn Invoicer>,
    ) -> Result<Self, ServiceError> {
        let icon = Icon::from_bytes(icon_bytes)?;
        let domain = lightning_address_domain(&config.url_authority)?;

        let identities = config.usernames.iter().map(|username| {
            Identity::new(
                username,
                &domain,
                &config.url_authority,
                &config.short_description,
                &icon,
            )
        });
        let registry = IdentityRegistry::from_identities(identities)?;

        for username in registry.usernames() {
            if let Some(identity) = registry.get(username) {
                info!(
                    address = %identity.lightning_address,
                    metadata_hash = %identity.metadata.hash_hex(),
                    "Serving Lightning Address"
                );
            }
        }

        let settings = Settings {
            pay_range: config.pay_range,
            invoice_expiry_secs: config.invoice_expiry.as_secs(),
        };

        Ok(Self {
            state: AppState::new(registry, settings, invoicer),
        })
    }

    /// Build a router serving every identity.
    pub fn router(&self) -> Router {
        routes::router().with_state(self.state.clone())
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.state.registry
    }

    pub fn settings(&self) -> Settings {
        self.state.settings
    }
}

/// Host (and explicit port, if any) of the URL authority.
fn lightning_address_domain(authority: &str) -> Result<String, ServiceError> {
    let invalid =
        |reason: &str| ServiceError::InvalidAuthority(authority.to_string(), reason.to_string());

    let url = Url::parse(authority).map_err(|e| invalid(&e.to_string()))?;
    let host = url.host_str().ok_or_else(|| invalid("missing host"))?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
