//! The LndInvoicer implementation.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use invoice_core::{InvoiceError, InvoiceRequest, Invoicer, PaymentRequest};

use crate::config::LndConfig;
use crate::error::LndError;

/// Header LND's REST gateway reads the macaroon from.
const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";

/// `POST /v1/invoices` body. LND's gateway takes 64-bit integers as strings
/// and `bytes` fields as standard base64.
#[derive(Debug, Serialize)]
struct AddInvoiceRequest {
    value_msat: String,
    description_hash: String,
    expiry: String,
}

#[derive(Debug, Deserialize)]
struct AddInvoiceResponse {
    #[serde(default)]
    payment_request: String,
}

/// Error body returned by LND's REST gateway.
#[derive(Debug, Deserialize)]
struct GatewayError {
    #[serde(default)]
    message: String,
}

/// Issues payment requests through LND's REST API.
///
/// Cloning is cheap and clones share the connection pool, so one instance
/// can serve every concurrent callback.
#[derive(Clone)]
pub struct LndInvoicer {
    http: Client,
    config: LndConfig,
}

impl LndInvoicer {
    /// Build the HTTP client for `config`.
    ///
    /// When a certificate is configured it becomes the only trusted root.
    pub fn new(config: LndConfig) -> Result<Self, LndError> {
        let mut builder = Client::builder().timeout(config.http_timeout);

        if let Some(pem) = &config.tls_cert_pem {
            let cert = reqwest::Certificate::from_pem(pem)?;
            builder = builder
                .tls_built_in_root_certs(false)
                .add_root_certificate(cert);
        }

        let http = builder.build()?;
        info!(host = %config.host, tls = config.tls_cert_pem.is_some(), "Created LND invoicer");

        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &LndConfig {
        &self.config
    }

    async fn add_invoice(&self, request: &InvoiceRequest) -> Result<String, LndError> {
        let body = AddInvoiceRequest {
            value_msat: request.value_msat.to_string(),
            description_hash: BASE64.encode(request.description_hash),
            expiry: request.expiry_secs.to_string(),
        };

        debug!(
            value_msat = request.value_msat,
            description_hash = %request.description_hash_hex(),
            "Adding invoice"
        );

        let response = self
            .http
            .post(self.config.invoices_url())
            .header(MACAROON_HEADER, self.config.macaroon_hex())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GatewayError>(&text)
                .ok()
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(text);
            return Err(LndError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: AddInvoiceResponse = response.json().await?;
        if reply.payment_request.is_empty() {
            return Err(LndError::InvalidResponse(
                "missing payment_request".to_string(),
            ));
        }

        Ok(reply.payment_request)
    }
}

#[async_trait]
impl Invoicer for LndInvoicer {
    async fn create_invoice(
        &self,
        request: InvoiceRequest,
    ) -> Result<PaymentRequest, InvoiceError> {
        let encoded = self.add_invoice(&request).await?;
        Ok(PaymentRequest::new(encoded))
    }

    fn name(&self) -> &str {
        "LND"
    }
}

impl std::fmt::Debug for LndInvoicer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LndInvoicer")
            .field("config", &self.config)
            .finish()
    }
}
