//! In-memory expiring cache for resolved avatar URLs
//!
//! Maps a derived lookup key to a resolved URL plus an absolute expiry
//! instant. Entries past their expiry answer as misses but are never
//! deleted; the next successful resolution for the key overwrites them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// TTL for NFT metadata entries, in hours
pub const METADATA_TTL_HOURS: i64 = 24;

/// A cached resolution result with its absolute expiry instant
///
/// Serializes in the host storage shape `{ "url": ..., "expiresAt": ISO-8601 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry is still valid at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }
}

/// Derive the storage key for an NFT avatar lookup
///
/// The address is lower-cased so ownership identity is case-insensitive;
/// the token id must already be in hex form without a `0x` prefix.
pub fn nft_cache_key(address: &str, contract_id: &str, token_id_hex: &str) -> String {
    format!("{}/{}/0x{}", address.to_lowercase(), contract_id, token_id_hex)
}

/// Expiring key/value store for resolved avatar URLs
///
/// Each key is independent; there is no eviction and no size bound. A write
/// always overwrites whatever entry was present, expired or not. Cloning
/// yields a handle to the same underlying store, so the component that
/// injects the cache can keep observing it.
#[derive(Debug, Clone, Default)]
pub struct AvatarCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl AvatarCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a key, treating entries past their expiry as absent
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        if entry.is_fresh(Utc::now()) {
            debug!(key, "avatar cache hit");
            Some(entry.url.clone())
        } else {
            debug!(key, expires_at = %entry.expires_at, "avatar cache entry expired");
            None
        }
    }

    /// Store a URL under `key`, expiring `ttl` from now
    pub async fn put(&self, key: &str, url: &str, ttl: Duration) {
        let entry = CacheEntry {
            url: url.to_string(),
            expires_at: Utc::now() + ttl,
        };

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
    }
}
