//! Accept loop and per-connection HTTP serving.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto;
use hyper_util::service::TowerToHyperService;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tower_http::timeout::TimeoutLayer;
use tracing::debug;

use crate::error::ListenerError;

/// Time allowed for request headers and for a TLS handshake.
pub const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Ceiling on producing a whole response.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum header bytes per request.
pub const MAX_HEADER_BYTES: usize = 1 << 20;

/// Bind `addr`.
pub async fn bind(addr: impl Into<String>) -> Result<TcpListener, ListenerError> {
    let addr = addr.into();
    TcpListener::bind(&addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })
}

/// Serve `app` on every connection accepted from `listener`.
///
/// With an acceptor each connection is TLS-wrapped first. Only returns on a
/// non-transient accept error.
pub async fn serve(
    listener: TcpListener,
    tls: Option<TlsAcceptor>,
    app: Router,
) -> Result<(), ListenerError> {
    let app = app.layer(TimeoutLayer::new(WRITE_TIMEOUT));

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) if is_connection_error(&err) => {
                debug!(error = %err, "Transient accept error");
                continue;
            }
            Err(err) => return Err(ListenerError::Accept(err)),
        };

        let app = app.clone();
        let tls = tls.clone();
        tokio::spawn(async move {
            match tls {
                Some(acceptor) => {
                    match tokio::time::timeout(READ_TIMEOUT, acceptor.accept(stream)).await {
                        Ok(Ok(stream)) => serve_connection(stream, peer, app).await,
                        Ok(Err(err)) => debug!(%peer, error = %err, "TLS handshake failed"),
                        Err(_) => debug!(%peer, "TLS handshake timed out"),
                    }
                }
                None => serve_connection(stream, peer, app).await,
            }
        });
    }
}

async fn serve_connection<S>(stream: S, peer: SocketAddr, app: Router)
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let mut builder = auto::Builder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(READ_TIMEOUT)
        .max_buf_size(MAX_HEADER_BYTES);
    builder
        .http2()
        .timer(TokioTimer::new())
        .max_header_list_size(MAX_HEADER_BYTES as u32);

    let service = TowerToHyperService::new(app);
    if let Err(err) = builder
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        debug!(%peer, error = %err, "Connection closed with error");
    }
}

fn is_connection_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn test_transient_accept_errors() {
        assert!(is_connection_error(&io::Error::from(io::ErrorKind::ConnectionReset)));
        assert!(is_connection_error(&io::Error::from(io::ErrorKind::ConnectionAborted)));
        assert!(!is_connection_error(&io::Error::from(io::ErrorKind::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_serves_plain_http() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/health", get(|| async { "ok" }));
        tokio::spawn(serve(listener, None, app));

        let body = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_bind_error() {
        let listener = bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let err = bind(addr.to_string()).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }));
    }
}
