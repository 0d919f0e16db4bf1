//! Request and response types for invoice backends.

use std::fmt;

use serde::{Deserialize, Serialize};

/// SHA-256 digest committed to by a payment request's description hash.
pub type DescriptionHash = [u8; 32];

/// Parameters for a single payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// Amount in millisatoshis.
    pub value_msat: u64,
    /// Digest of the off-band metadata the invoice is bound to.
    pub description_hash: DescriptionHash,
    /// How long the invoice stays payable.
    pub expiry_secs: u64,
}

impl InvoiceRequest {
    /// Create a new invoice request.
    pub fn new(value_msat: u64, description_hash: DescriptionHash, expiry_secs: u64) -> Self {
        Self {
            value_msat,
            description_hash,
            expiry_secs,
        }
    }

    /// Description hash as lowercase hex, for logs.
    pub fn description_hash_hex(&self) -> String {
        hex::encode(self.description_hash)
    }
}

/// An encoded, signed payment request (BOLT11 invoice).
///
/// Opaque to everything except the payer's wallet; relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentRequest(String);

impl PaymentRequest {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PaymentRequest {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}
