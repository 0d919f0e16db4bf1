//! Error types for the server binary.

use std::io;
use std::path::PathBuf;

use lnd_invoicer::LndError;
use lnurl_pay::ServiceError;

/// Configuration errors. Every one of these is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("missing '{0}' in config")]
    Missing(&'static str),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors that end a listener.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),

    #[error("unable to load {what} from {path}: {reason}")]
    Certificate {
        what: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("{0}")]
    TaskFailed(String),
}

/// Anything that stops the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unable to open icon_file at {path}: {source}")]
    Icon {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to set up LND backend: {0}")]
    Backend(#[from] LndError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}
