//! Discovery endpoint: `GET /.well-known/lnurlp/{username}`.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::LnurlError;
use crate::state::AppState;

/// The LUD-06 pay request.
#[derive(Debug, Serialize)]
pub struct PayRequestResponse<'a> {
    pub callback: &'a str,
    #[serde(rename = "maxSendable")]
    pub max_sendable: u64,
    #[serde(rename = "minSendable")]
    pub min_sendable: u64,
    /// The metadata array as a JSON string, byte for byte what was hashed.
    pub metadata: &'a str,
    pub tag: &'static str,
}

/// Answer a discovery request for `username`.
pub async fn pay_request(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Response, LnurlError> {
    let identity = state
        .registry
        .get(&username)
        .ok_or(LnurlError::UnknownUser(username))?;

    info!(username = %identity.username, "GET pay request");

    let range = state.settings.pay_range;
    let body = PayRequestResponse {
        callback: &identity.callback,
        max_sendable: range.max_sendable_msat(),
        min_sendable: range.min_sendable_msat(),
        metadata: identity.metadata.as_str(),
        tag: "payRequest",
    };

    Ok(Json(body).into_response())
}
