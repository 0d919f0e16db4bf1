//! Application state shared across handlers.

use std::sync::Arc;

use invoice_core::Invoicer;

use crate::identity::{IdentityRegistry, PayRange};

/// Settings common to every identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub pay_range: PayRange,
    pub invoice_expiry_secs: u64,
}

/// Shared application state.
///
/// Everything here is read-only after startup; the invoicer must tolerate
/// concurrent calls.
#[derive(Clone)]
pub struct AppState {
    /// Configured identities.
    pub registry: IdentityRegistry,
    pub settings: Settings,
    /// Invoice backend.
    pub invoicer: Arc<dyn Invoicer>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        registry: IdentityRegistry,
        settings: Settings,
        invoicer: Arc<dyn Invoicer>,
    ) -> Self {
        Self {
            registry,
            settings,
            invoicer,
        }
    }
}
