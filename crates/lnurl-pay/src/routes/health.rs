//! Liveness probe. Never touches the invoice backend.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    /// Number of Lightning Addresses served.
    pub identities: usize,
    pub backend: String,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        identities: state.registry.len(),
        backend: state.invoicer.name().to_string(),
    })
}
