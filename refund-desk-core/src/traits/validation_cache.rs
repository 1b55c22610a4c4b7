//! Validation cache abstract Trait

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::CachedValidation;

/// Key-value store for IBAN validation results
///
/// Keys come from [`ValidationKey::cache_key`](crate::types::ValidationKey::cache_key).
/// Entries are never removed by callers; a store may expire them on its own.
///
/// Platform implementation:
/// - `MemoryValidationCache` (this module, optional TTL)
/// - `FileValidationCache` (refund-desk-app, one JSON file per key)
#[async_trait]
pub trait ValidationCache: Send + Sync {
    /// Look up a stored result
    ///
    /// # Arguments
    /// * `key` - cache key
    ///
    /// `Ok(None)` is a miss; `Ok(Some(entry))` with `entry.error == None` is a
    /// cached "valid".
    async fn get(&self, key: &str) -> CoreResult<Option<CachedValidation>>;

    /// Store a result, replacing any previous entry
    ///
    /// # Arguments
    /// * `key` - cache key
    /// * `value` - validation result
    async fn set(&self, key: &str, value: &CachedValidation) -> CoreResult<()>;
}

struct MemoryEntry {
    value: CachedValidation,
    stored_at: Instant,
}

/// In-memory validation cache
///
/// With a TTL, entries older than the TTL read as misses. A stale entry is
/// removed when read, and every write sweeps all stale entries.
#[derive(Clone)]
pub struct MemoryValidationCache {
    entries: Arc<RwLock<HashMap<String, MemoryEntry>>>,
    ttl: Option<Duration>,
}

impl MemoryValidationCache {
    /// Cache whose entries never expire
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: None,
        }
    }

    /// Cache whose entries expire `ttl` after being written
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::new()
        }
    }

    /// Number of stored entries, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    fn is_fresh(&self, entry: &MemoryEntry) -> bool {
        self.ttl.is_none_or(|ttl| entry.stored_at.elapsed() < ttl)
    }
}

impl Default for MemoryValidationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ValidationCache for MemoryValidationCache {
    async fn get(&self, key: &str) -> CoreResult<Option<CachedValidation>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if self.is_fresh(entry) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !self.is_fresh(entry)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &CachedValidation) -> CoreResult<()> {
        let mut entries = self.entries.write().await;
        if self.ttl.is_some() {
            entries.retain(|_, entry| self.is_fresh(entry));
        }
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }
}
