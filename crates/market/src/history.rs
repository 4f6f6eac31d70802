use cacao_core::cache::port::{Cache, CacheExt};
use cacao_core::common::HistoryWindow;
use cacao_core::common::time::TimeProvider;
use cacao_core::market::entity::PriceSeries;
use cacao_core::market::error::MarketError;
use cacao_core::market::port::PriceHistoryProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// # Summary
/// Acquisition component: daily history for (symbol, window), served from a
/// TTL cache when fresh and from the provider otherwise.
///
/// # Invariants
/// - At most one provider call per `load` (no retry loop).
/// - Only non-empty successful results are cached.
/// - Cache failures never fail a load; they degrade to a miss.
pub struct HistoryService {
    provider: Arc<dyn PriceHistoryProvider>,
    cache: Arc<dyn Cache>,
    clock: Arc<dyn TimeProvider>,
    ttl: Duration,
}

impl HistoryService {
    /// # Summary
    /// Wires the service with its collaborators.
    ///
    /// # Arguments
    /// * `provider`: upstream history source.
    /// * `cache`: shared TTL store.
    /// * `clock`: time source for window boundaries.
    /// * `ttl`: how long a fetched history stays fresh.
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        cache: Arc<dyn Cache>,
        clock: Arc<dyn TimeProvider>,
        ttl: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            clock,
            ttl,
        }
    }

    /// Cache key for a (symbol, window) pair
    pub fn cache_key(symbol: &str, window: HistoryWindow) -> String {
        format!("history:{}:{}", symbol, window)
    }

    /// # Summary
    /// Returns the trailing history of `symbol`.
    ///
    /// # Logic
    /// 1. Look up `history:{symbol}:{window}`; a live entry is returned as is.
    /// 2. On a miss, ask the provider for `[now - window, now]` once.
    /// 3. An empty answer becomes `MarketError::NotFound` and is not cached.
    /// 4. Store a non-empty answer with the configured TTL.
    ///
    /// # Arguments
    /// * `symbol`: provider ticker.
    /// * `window`: trailing lookback.
    ///
    /// # Returns
    /// A non-empty series, or the `MarketError` that made it unavailable.
    pub async fn load(
        &self,
        symbol: &str,
        window: HistoryWindow,
    ) -> Result<PriceSeries, MarketError> {
        let key = Self::cache_key(symbol, window);

        match self.cache.get::<PriceSeries>(&key).await {
            Ok(Some(series)) => {
                debug!(%key, bars = series.len(), "history cache hit");
                return Ok(series);
            }
            Ok(None) => debug!(%key, "history cache miss"),
            Err(e) => warn!(%key, error = %e, "history cache read failed, refetching"),
        }

        let end = self.clock.now();
        let start = end - window.span();
        let series = match self.provider.fetch_daily(symbol, start, end).await {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol, %window, error = %e, "history fetch failed");
                return Err(e);
            }
        };

        if series.is_empty() {
            warn!(symbol, %window, "provider returned no bars");
            return Err(MarketError::NotFound);
        }

        info!(symbol, %window, bars = series.len(), "history refreshed");
        if let Err(e) = self.cache.set(&key, &series, Some(self.ttl)).await {
            warn!(%key, error = %e, "history cache write failed");
        }

        Ok(series)
    }
}
