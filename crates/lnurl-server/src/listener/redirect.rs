//! Plain HTTP to HTTPS redirect for the port 80 listener.

use axum::http::header::HOST;
use axum::http::uri::Authority;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};

/// Permanently redirect to the same path and query over HTTPS.
pub async fn redirect_to_https(headers: HeaderMap, uri: Uri) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.host())
        .filter(|host| !host.is_empty());

    match host {
        Some(host) => Redirect::permanent(&https_url(host, &uri)).into_response(),
        None => (StatusCode::BAD_REQUEST, "missing Host header").into_response(),
    }
}

/// `https://{host}{path}[?{query}]`, dropping any port from `host`.
pub fn https_url(host: &str, uri: &Uri) -> String {
    let host = host
        .parse::<Authority>()
        .map(|authority| authority.host().to_string())
        .unwrap_or_else(|_| host.to_string());

    let mut url = format!("https://{}{}", host, uri.path());
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::LOCATION;
    use axum::http::Request;
    use axum::Router;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().fallback(redirect_to_https)
    }

    #[test]
    fn test_https_url() {
        let uri: Uri = "/foo?x=1".parse().unwrap();
        assert_eq!(https_url("example.com", &uri), "https://example.com/foo?x=1");

        let uri: Uri = "/.well-known/lnurlp/alice".parse().unwrap();
        assert_eq!(
            https_url("example.com:80", &uri),
            "https://example.com/.well-known/lnurlp/alice"
        );

        let uri: Uri = "/".parse().unwrap();
        assert_eq!(https_url("[::1]:80", &uri), "https://[::1]/");
    }

    #[tokio::test]
    async fn test_redirects_with_path_and_query() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/foo?x=1")
                    .header(HOST, "example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://example.com/foo?x=1"
        );
    }

    #[tokio::test]
    async fn test_missing_host_is_bad_request() {
        let response = app()
            .oneshot(Request::builder().uri("/foo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
