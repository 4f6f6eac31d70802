use async_trait::async_trait;
use cacao_core::cache::error::CacheError;
use cacao_core::cache::port::Cache;
use cacao_core::common::time::{RealTimeProvider, TimeProvider};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// # Summary
/// A stored value and the instant it stops being visible.
struct CacheEntry {
    value: Vec<u8>,
    // None = never expires
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// # Summary
/// In-memory TTL cache backed by `DashMap`.
///
/// # Invariants
/// - All operations go through the concurrent map; safe to share across
///   tasks behind an `Arc`.
/// - Expiry is judged against the injected clock. Expired entries are
///   dropped lazily on read.
pub struct MemCache {
    // Thread safe KV container
    storage: DashMap<String, CacheEntry>,
    clock: Arc<dyn TimeProvider>,
}

impl MemCache {
    /// # Summary
    /// Creates a cache driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(RealTimeProvider))
    }

    /// # Summary
    /// Creates a cache whose expiry follows `clock`.
    ///
    /// # Arguments
    /// * `clock`: time source used to stamp and check entries.
    ///
    /// # Returns
    /// An empty cache.
    pub fn with_clock(clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            storage: DashMap::new(),
            clock,
        }
    }

    /// Number of stored entries, expired ones included until next read
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for MemCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for MemCache {
    /// # Summary
    /// Stores bytes under `key`, overwriting any previous entry.
    ///
    /// # Logic
    /// 1. Convert `ttl` into an absolute expiry on the injected clock.
    /// 2. Insert the entry.
    ///
    /// # Returns
    /// `CacheError::InvalidTtl` if the TTL overflows the clock range.
    async fn set_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let expires_at = match ttl {
            Some(ttl) => {
                let delta = chrono::Duration::from_std(ttl)
                    .map_err(|e| CacheError::InvalidTtl(e.to_string()))?;
                let at = self
                    .clock
                    .now()
                    .checked_add_signed(delta)
                    .ok_or_else(|| CacheError::InvalidTtl(format!("{:?} overflows", ttl)))?;
                Some(at)
            }
            None => None,
        };

        self.storage
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    /// # Summary
    /// Returns a copy of the live entry under `key`.
    ///
    /// # Logic
    /// 1. Look the key up.
    /// 2. If the entry has expired, remove it and report a miss.
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = self.clock.now();
        let expired = match self.storage.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            trace!(key, "cache entry expired");
            self.storage.remove_if(key, |_, entry| entry.is_expired(now));
        }
        Ok(None)
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove(key);
        Ok(())
    }
}
