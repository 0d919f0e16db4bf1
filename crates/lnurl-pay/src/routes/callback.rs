//! Callback endpoint: `GET /pay/callback/{username}?amount=<msat>`.

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use invoice_core::InvoiceRequest;
use serde::Serialize;
use tracing::info;
use url::form_urlencoded;

use crate::error::LnurlError;
use crate::state::AppState;

/// Successful callback reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayCallbackResponse {
    pub pr: String,
    /// Always empty; no hop hints are resolved.
    pub routes: Vec<serde_json::Value>,
}

/// Validate the amount and ask the backend for a payment request.
pub async fn pay_callback(
    State(state): State<AppState>,
    Path(username): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<PayCallbackResponse>, LnurlError> {
    let identity = state
        .registry
        .get(&username)
        .ok_or(LnurlError::UnknownUser(username))?;

    let amount_msat = parse_amount(first_amount(query.as_deref()).as_deref())?;

    info!(username = %identity.username, amount_msat, "GET pay callback");

    let range = state.settings.pay_range;
    if !range.contains_msat(amount_msat) {
        return Err(LnurlError::AmountOutOfRange {
            amount_msat,
            min_msat: range.min_sendable_msat(),
            max_msat: range.max_sendable_msat(),
        });
    }

    let request = InvoiceRequest::new(
        amount_msat,
        identity.metadata.hash(),
        state.settings.invoice_expiry_secs,
    );
    let pr = state.invoicer.create_invoice(request).await?;

    info!(
        username = %identity.username,
        amount_msat,
        backend = state.invoicer.name(),
        "Issued payment request"
    );

    Ok(Json(PayCallbackResponse {
        pr: pr.into_inner(),
        routes: Vec::new(),
    }))
}

/// The first `amount` value in the query string; later repeats are ignored.
fn first_amount(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .find(|(key, _)| key == "amount")
        .map(|(_, value)| value.into_owned())
}

/// Parse a millisat amount; a missing parameter parses like an empty one.
///
/// Only plain decimal digits are accepted.
fn parse_amount(raw: Option<&str>) -> Result<u64, LnurlError> {
    let raw = raw.unwrap_or_default();
    if raw.starts_with('+') {
        return Err(LnurlError::MalformedAmount("invalid digit found in string".to_string()));
    }
    raw.parse::<u64>().map_err(|e| LnurlError::MalformedAmount(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(Some("500000")).unwrap(), 500_000);
        assert_eq!(parse_amount(Some("0")).unwrap(), 0);
        assert_eq!(parse_amount(Some("18446744073709551615")).unwrap(), u64::MAX);
    }

    #[test]
    fn test_parse_amount_errors() {
        for raw in [
            None,
            Some(""),
            Some("abc"),
            Some("-5"),
            Some("+5"),
            Some("1.5"),
            Some("18446744073709551616"),
        ] {
            let err = parse_amount(raw).unwrap_err();
            assert!(
                err.to_string().starts_with("cannot parse amount: "),
                "{raw:?} -> {err}"
            );
        }
    }

    #[test]
    fn test_first_amount() {
        assert_eq!(first_amount(Some("amount=1000")).as_deref(), Some("1000"));
        assert_eq!(
            first_amount(Some("amount=1000&amount=2000")).as_deref(),
            Some("1000")
        );
        assert_eq!(
            first_amount(Some("comment=hi&amount=%2B500")).as_deref(),
            Some("+500")
        );
        assert_eq!(first_amount(Some("comment=hi")), None);
        assert_eq!(first_amount(None), None);
    }
}
