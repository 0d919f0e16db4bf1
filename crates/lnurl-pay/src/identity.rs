//! Configured identities and the amount range they accept.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::metadata::{Icon, PayMetadata};

const MSAT_PER_SAT: u64 = 1000;

/// Inclusive range of acceptable payment amounts, configured in sats.
///
/// This is the only place sats become millisats; discovery and callback
/// both go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayRange {
    pub min_sats: u64,
    pub max_sats: u64,
}

impl PayRange {
    pub fn new(min_sats: u64, max_sats: u64) -> Self {
        Self { min_sats, max_sats }
    }

    /// `minSendable` in millisats.
    pub fn min_sendable_msat(&self) -> u64 {
        self.min_sats.saturating_mul(MSAT_PER_SAT)
    }

    /// `maxSendable` in millisats.
    pub fn max_sendable_msat(&self) -> u64 {
        self.max_sats.saturating_mul(MSAT_PER_SAT)
    }

    /// Whether `amount_msat` is within `[minSendable, maxSendable]`.
    pub fn contains_msat(&self, amount_msat: u64) -> bool {
        (self.min_sendable_msat()..=self.max_sendable_msat()).contains(&amount_msat)
    }
}

/// One Lightning Address served by this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    /// `username@domain`
    pub lightning_address: String,
    /// Absolute callback URL advertised at discovery.
    pub callback: String,
    pub metadata: PayMetadata,
}

impl Identity {
    pub fn new(
        username: &str,
        domain: &str,
        authority: &str,
        description: &str,
        icon: &Icon,
    ) -> Self {
        let lightning_address = format!("{}@{}", username, domain);
        let metadata = PayMetadata::from_icon(&lightning_address, description, icon);
        let callback = format!("{}/pay/callback/{}", authority.trim_end_matches('/'), username);

        Self {
            username: username.to_string(),
            lightning_address,
            callback,
            metadata,
        }
    }
}

/// Username to identity lookup, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    by_username: Arc<HashMap<String, Arc<Identity>>>,
}

impl IdentityRegistry {
    /// Build the registry, rejecting an empty list and duplicates.
    pub fn from_identities(
        identities: impl IntoIterator<Item = Identity>,
    ) -> Result<Self, ServiceError> {
        let mut by_username = HashMap::new();
        for identity in identities {
            let username = identity.username.clone();
            if by_username.insert(username.clone(), Arc::new(identity)).is_some() {
                return Err(ServiceError::DuplicateUsername(username));
            }
        }

        if by_username.is_empty() {
            return Err(ServiceError::NoIdentities);
        }

        Ok(Self {
            by_username: Arc::new(by_username),
        })
    }

    pub fn get(&self, username: &str) -> Option<Arc<Identity>> {
        self.by_username.get(username).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }

    /// Usernames in sorted order.
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_username.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
