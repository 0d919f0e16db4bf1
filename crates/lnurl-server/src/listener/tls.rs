//! rustls server configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use rustls::server::ResolvesServerCert;
use rustls::ServerConfig;

use crate::error::ListenerError;

/// ALPN protocols offered to clients, in preference order.
const ALPN_PROTOCOLS: [&[u8]; 2] = [b"h2", b"http/1.1"];

/// Load a certificate chain and private key from PEM files.
pub fn load_static_config(
    cert_file: &Path,
    key_file: &Path,
) -> Result<Arc<ServerConfig>, ListenerError> {
    let certs = {
        let mut reader = open("certificate", cert_file)?;
        rustls_pemfile::certs(&mut reader)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| cert_error("certificate", cert_file, e.to_string()))?
    };
    if certs.is_empty() {
        return Err(cert_error("certificate", cert_file, "no certificates found".to_string()));
    }

    let key = {
        let mut reader = open("private key", key_file)?;
        rustls_pemfile::private_key(&mut reader)
            .map_err(|e| cert_error("private key", key_file, e.to_string()))?
            .ok_or_else(|| cert_error("private key", key_file, "no private key found".to_string()))?
    };

    install_crypto_provider();
    let mut config = ServerConfig::builder_with_protocol_versions(&[
        &rustls::version::TLS13,
        &rustls::version::TLS12,
    ])
    .with_no_client_auth()
    .with_single_cert(certs, key)?;
    config.alpn_protocols = alpn_protocols();

    Ok(Arc::new(config))
}

/// Server configuration that asks `resolver` for a certificate on every handshake.
pub fn config_with_resolver(resolver: Arc<dyn ResolvesServerCert>) -> Arc<ServerConfig> {
    install_crypto_provider();
    let mut config = ServerConfig::builder_with_protocol_versions(&[
        &rustls::version::TLS13,
        &rustls::version::TLS12,
    ])
    .with_no_client_auth()
    .with_cert_resolver(resolver);
    config.alpn_protocols = alpn_protocols();

    Arc::new(config)
}

/// Select ring as the process-wide provider. Later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

fn alpn_protocols() -> Vec<Vec<u8>> {
    ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect()
}

fn open(what: &'static str, path: &Path) -> Result<BufReader<File>, ListenerError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| cert_error(what, path, e.to_string()))
}

fn cert_error(what: &'static str, path: &Path, reason: String) -> ListenerError {
    ListenerError::Certificate {
        what,
        path: path.to_path_buf(),
        reason,
    }
}
