use crate::market::entity::PriceSeries;
use crate::market::error::MarketError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// # Summary
/// Raw source of daily price history (network provider).
///
/// # Invariants
/// - One call performs at most one upstream request; retries are not the
///   provider's job.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// # Summary
    /// Fetches the daily bars of `symbol` between `start` and `end`.
    ///
    /// # Logic
    /// 1. Build the upstream request for the daily interval.
    /// 2. Execute it once and decode the payload.
    /// 3. Drop rows that have any missing OHLCV field.
    ///
    /// # Arguments
    /// * `symbol`: provider ticker (e.g. `CC=F`).
    /// * `start`: window start (inclusive).
    /// * `end`: window end.
    ///
    /// # Returns
    /// A possibly empty chronological series, or `MarketError`.
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries, MarketError>;
}
