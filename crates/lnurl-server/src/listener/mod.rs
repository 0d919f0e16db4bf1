//! Listener orchestration.
//!
//! Three ways to put the router on the network:
//!
//! - [`TlsStrategy::Plaintext`] - HTTP on the configured address
//! - [`TlsStrategy::Static`] - HTTPS with a certificate and key from disk
//! - [`TlsStrategy::Automatic`] - HTTPS on :443 with ACME certificates, plus
//!   challenge answering and redirects on :80
//!
//! Every mode runs until a listener fails.

mod acme;
mod conn;
mod redirect;
mod tls;

use std::future::Future;
use std::path::PathBuf;

use axum::Router;
use tokio::sync::mpsc;
use tokio_rustls::TlsAcceptor;
use tracing::{error, info, warn};

use crate::error::ListenerError;

/// How the server listens, derived from validated configuration.
#[derive(Debug, Clone)]
pub enum TlsStrategy {
    /// `bind` is a `host:port` resolved when the listener starts.
    Plaintext {
        bind: String,
    },
    Static {
        bind: String,
        cert_file: PathBuf,
        key_file: PathBuf,
    },
    Automatic(AutocertSettings),
}

/// ACME settings for automatic mode.
#[derive(Debug, Clone)]
pub struct AutocertSettings {
    pub domains: Vec<String>,
    pub cache_dir: PathBuf,
    /// Contact e-mail for the ACME account.
    pub contact: Option<String>,
    /// Use the Let's Encrypt staging directory.
    pub staging: bool,
}

/// Serve `app` according to `strategy`.
///
/// Returns the error of whichever listener stops first.
pub async fn serve(strategy: TlsStrategy, app: Router) -> Result<(), ListenerError> {
    match strategy {
        TlsStrategy::Plaintext { bind } => {
            warn!(addr = %bind, "Starting server without TLS");
            let listener = conn::bind(bind).await?;
            conn::serve(listener, None, app).await
        }
        TlsStrategy::Static {
            bind,
            cert_file,
            key_file,
        } => {
            let config = tls::load_static_config(&cert_file, &key_file)?;
            info!(
                addr = %bind,
                cert = %cert_file.display(),
                "Starting server with TLS certificate from disk"
            );
            let listener = conn::bind(bind).await?;
            conn::serve(listener, Some(TlsAcceptor::from(config)), app).await
        }
        TlsStrategy::Automatic(settings) => acme::serve(settings, app).await,
    }
}

/// Run two listeners on their own tasks and return the first result.
///
/// The slower task is left running; it ends with the process.
async fn run_first<A, B>(
    first: (&'static str, A),
    second: (&'static str, B),
) -> Result<(), ListenerError>
where
    A: Future<Output = Result<(), ListenerError>> + Send + 'static,
    B: Future<Output = Result<(), ListenerError>> + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel(2);
    spawn_reporting(first.0, first.1, tx.clone());
    spawn_reporting(second.0, second.1, tx);

    match rx.recv().await {
        Some((name, result)) => {
            match &result {
                Ok(()) => info!(listener = name, "Listener stopped"),
                Err(err) => error!(listener = name, error = %err, "Listener failed"),
            }
            result
        }
        None => Err(ListenerError::TaskFailed(
            "listeners exited without reporting".to_string(),
        )),
    }
}

fn spawn_reporting<F>(
    name: &'static str,
    task: F,
    tx: mpsc::Sender<(&'static str, Result<(), ListenerError>)>,
) where
    F: Future<Output = Result<(), ListenerError>> + Send + 'static,
{
    let handle = tokio::spawn(task);
    tokio::spawn(async move {
        let result = match handle.await {
            Ok(result) => result,
            Err(err) => Err(ListenerError::TaskFailed(format!(
                "{name} listener task failed: {err}"
            ))),
        };
        let _ = tx.send((name, result)).await;
    });
}
