//! LndInvoicer against a mock LND REST gateway.

use invoice_core::{InvoiceError, InvoiceRequest, Invoicer};
use lnd_invoicer::{LndConfig, LndInvoicer};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn invoicer_for(server: &MockServer) -> LndInvoicer {
    let config = LndConfig::new(server.address().to_string(), None, &[0x02, 0x01, 0xff]);
    LndInvoicer::new(config).expect("client builds")
}

#[tokio::test]
async fn test_add_invoice_success() {
    let server = MockServer::start().await;

    // base64 of 32 bytes of 0x01
    let hash_b64 = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";

    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .and(header("Grpc-Metadata-macaroon", "0201ff"))
        .and(body_json(json!({
            "value_msat": "500000",
            "description_hash": hash_b64,
            "expiry": "600",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "r_hash": "abc=",
            "payment_request": "lnbc5u1pjtest",
            "add_index": "7",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let invoicer = invoicer_for(&server);
    let pr = invoicer
        .create_invoice(InvoiceRequest::new(500_000, [1; 32], 600))
        .await
        .unwrap();

    assert_eq!(pr.as_str(), "lnbc5u1pjtest");
}

#[tokio::test]
async fn test_gateway_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 2,
            "message": "invoice expiry too large",
            "details": [],
        })))
        .mount(&server)
        .await;

    let err = invoicer_for(&server)
        .create_invoice(InvoiceRequest::new(1_000, [0; 32], u64::MAX))
        .await
        .unwrap_err();

    assert!(matches!(err, InvoiceError::Backend(_)));
    assert!(err.to_string().contains("invoice expiry too large"));
}

#[tokio::test]
async fn test_bad_macaroon_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("verification failed"))
        .mount(&server)
        .await;

    let err = invoicer_for(&server)
        .create_invoice(InvoiceRequest::new(1_000, [0; 32], 60))
        .await
        .unwrap_err();

    match err {
        InvoiceError::Unauthorized(msg) => assert_eq!(msg, "verification failed"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_payment_request_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "add_index": "1" })))
        .mount(&server)
        .await;

    let err = invoicer_for(&server)
        .create_invoice(InvoiceRequest::new(1_000, [0; 32], 60))
        .await
        .unwrap_err();

    assert!(matches!(err, InvoiceError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_node() {
    // Nothing listens on port 1.
    let config = LndConfig::new("127.0.0.1:1", None, b"m");
    let err = LndInvoicer::new(config)
        .unwrap()
        .create_invoice(InvoiceRequest::new(1_000, [0; 32], 60))
        .await
        .unwrap_err();

    assert!(matches!(err, InvoiceError::Unreachable(_)));
}

#[test]
fn test_invalid_pem_fails_client_construction() {
    let config = LndConfig::new("127.0.0.1:8080", Some(b"not a certificate".to_vec()), b"m");
    assert!(LndInvoicer::new(config).is_err());
}
