use crate::cache::error::CacheError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// # Summary
/// Async key-value store with optional per-entry expiry (Port).
///
/// # Invariants
/// - Works on raw bytes so the trait stays object safe.
/// - An entry past its TTL is never returned; it behaves as absent.
/// - Stored values are snapshots; nothing mutates them in place.
#[async_trait]
pub trait Cache: Send + Sync {
    /// # Summary
    /// Stores raw bytes under `key`, replacing any previous entry.
    ///
    /// # Arguments
    /// * `key`: unique key.
    /// * `value`: raw bytes.
    /// * `ttl`: lifetime of the entry; `None` keeps it until deleted.
    ///
    /// # Returns
    /// `Ok(())`, or `CacheError` if the TTL or backend rejects the write.
    async fn set_raw(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError>;

    /// # Summary
    /// Reads raw bytes stored under `key`.
    ///
    /// # Returns
    /// `Some(bytes)` for a live entry, `None` if missing or expired.
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Removes `key`; absent keys are not an error.
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}

/// # Summary
/// Typed helpers over `Cache` using JSON encoding.
///
/// # Invariants
/// - Implemented for every `Cache`, including trait objects.
#[async_trait]
pub trait CacheExt: Cache {
    /// # Summary
    /// Stores a typed value.
    ///
    /// # Logic
    /// 1. Encode `value` as JSON.
    /// 2. Delegate to `set_raw`.
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value).map_err(|e| CacheError::Serialize(e.to_string()))?;
        self.set_raw(key, bytes, ttl).await
    }

    /// # Summary
    /// Reads a typed value.
    ///
    /// # Logic
    /// 1. Fetch bytes through `get_raw`.
    /// 2. Decode them from JSON into `T`.
    ///
    /// # Returns
    /// The decoded value, `None` on a miss, or `CacheError::Deserialize`.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key).await? {
            Some(bytes) => {
                let val = serde_json::from_slice(&bytes)
                    .map_err(|e| CacheError::Deserialize(e.to_string()))?;
                Ok(Some(val))
            }
            None => Ok(None),
        }
    }
}

impl<T: Cache + ?Sized> CacheExt for T {}
