use cacao_cache::mem::MemCache;
use cacao_core::cache::port::{Cache, CacheExt};
use cacao_core::common::time::FakeClockProvider;
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Snapshot {
    symbol: String,
    closes: Vec<f64>,
}

fn fake_clock() -> Arc<FakeClockProvider> {
    Arc::new(FakeClockProvider::new(
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap(),
    ))
}

#[tokio::test]
async fn test_mem_cache_raw_ops() {
    let cache = MemCache::new();
    let key = "raw_key";
    let value = vec![1, 2, 3, 4];

    cache.set_raw(key, value.clone(), None).await.unwrap();
    let result = cache.get_raw(key).await.unwrap().unwrap();
    assert_eq!(result, value);

    cache.del(key).await.unwrap();
    assert!(cache.get_raw(key).await.unwrap().is_none());

    // deleting a missing key is fine
    cache.del(key).await.unwrap();
}

#[tokio::test]
async fn test_mem_cache_typed_ops() {
    let cache = MemCache::new();
    let item = Snapshot {
        symbol: "CC=F".to_string(),
        closes: vec![8120.0, 8201.5],
    };

    cache.set("history:CC=F:2y", &item, None).await.unwrap();
    let result: Snapshot = cache.get("history:CC=F:2y").await.unwrap().unwrap();
    assert_eq!(result, item);
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let clock = fake_clock();
    let cache = MemCache::with_clock(clock.clone());
    let ttl = Duration::from_secs(600);

    cache.set_raw("k", vec![7], Some(ttl)).await.unwrap();

    clock.advance(chrono::Duration::seconds(599));
    assert_eq!(cache.get_raw("k").await.unwrap(), Some(vec![7]));

    clock.advance(chrono::Duration::seconds(1));
    assert!(cache.get_raw("k").await.unwrap().is_none());
    assert!(cache.is_empty(), "expired entry should be evicted on read");
}

#[tokio::test]
async fn test_overwrite_refreshes_ttl() {
    let clock = fake_clock();
    let cache = MemCache::with_clock(clock.clone());
    let ttl = Duration::from_secs(60);

    cache.set_raw("k", vec![1], Some(ttl)).await.unwrap();
    clock.advance(chrono::Duration::seconds(50));
    cache.set_raw("k", vec![2], Some(ttl)).await.unwrap();
    clock.advance(chrono::Duration::seconds(50));

    assert_eq!(cache.get_raw("k").await.unwrap(), Some(vec![2]));
}

#[tokio::test]
async fn test_typed_get_with_wrong_shape_is_error() {
    let cache = MemCache::new();
    cache.set_raw("k", b"not json".to_vec(), None).await.unwrap();

    let result: Result<Option<Snapshot>, _> = cache.get("k").await;
    assert!(result.is_err());
}
