//! Automatic certificates from Let's Encrypt.
//!
//! HTTPS is served on port 443 with certificates obtained and renewed over
//! HTTP-01. Port 80 answers the challenges and redirects everything else.

use std::fmt::Debug;

use axum::Router;
use futures::StreamExt;
use rustls_acme::caches::DirCache;
use rustls_acme::{AcmeConfig, AcmeState, UseChallenge};
use tokio_rustls::TlsAcceptor;
use tracing::{error, info};

use super::{conn, redirect, run_first, tls, AutocertSettings};
use crate::error::ListenerError;

const HTTPS_ADDR: &str = "0.0.0.0:443";
const HTTP_ADDR: &str = "0.0.0.0:80";

/// Path answered by the challenge responder.
const CHALLENGE_PATH: &str = "/.well-known/acme-challenge/:token";

pub(super) async fn serve(settings: AutocertSettings, app: Router) -> Result<(), ListenerError> {
    info!(
        domains = ?settings.domains,
        cache_dir = %settings.cache_dir.display(),
        staging = settings.staging,
        "Starting server on ports 443 and 80 with automatic certificates"
    );

    let mut state = AcmeConfig::new(settings.domains)
        .contact(settings.contact.iter().map(|email| format!("mailto:{email}")))
        .cache(DirCache::new(settings.cache_dir))
        .directory_lets_encrypt(!settings.staging)
        .challenge_type(UseChallenge::Http01)
        .state();

    let acceptor = TlsAcceptor::from(tls::config_with_resolver(state.resolver()));
    let http_app = http_router(&state);

    tokio::spawn(async move {
        while let Some(event) = state.next().await {
            match event {
                Ok(ok) => info!(event = ?ok, "ACME event"),
                Err(err) => error!(error = ?err, "ACME error"),
            }
        }
    });

    run_first(
        ("https", async move {
            let listener = conn::bind(HTTPS_ADDR).await?;
            conn::serve(listener, Some(acceptor), app).await
        }),
        ("http", async move {
            let listener = conn::bind(HTTP_ADDR).await?;
            conn::serve(listener, None, http_app).await
        }),
    )
    .await
}

/// Port 80: challenge tokens go to the ACME responder, everything else is
/// redirected to HTTPS.
fn http_router<EC, EA>(state: &AcmeState<EC, EA>) -> Router
where
    EC: Debug + 'static,
    EA: Debug + 'static,
{
    Router::new()
        .route_service(CHALLENGE_PATH, state.http01_challenge_tower_service())
        .fallback(redirect::redirect_to_https)
}
