use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// One trading day of a futures contract.
///
/// # Invariants
/// - Immutable once recorded.
/// - Prices are quoted in the exchange unit (USD per metric ton for cocoa).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    // Session start
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// # Summary
    /// Model feature vector for this bar.
    ///
    /// # Returns
    /// `[open, high, low, close, volume]`.
    pub fn features(&self) -> [f64; 5] {
        [self.open, self.high, self.low, self.close, self.volume]
    }

    /// True when every feature is a finite number.
    pub fn is_complete(&self) -> bool {
        self.features().iter().all(|v| v.is_finite())
    }
}

/// # Summary
/// Chronological daily history over a trailing window.
///
/// # Invariants
/// - Bars are ordered oldest first, one per trading day.
/// - May be empty; consumers must treat that as "unavailable".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// # Summary
    /// Builds a series from bars, sorting them by date.
    ///
    /// # Arguments
    /// * `bars`: bars in any order.
    ///
    /// # Returns
    /// A chronologically ordered series.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

impl From<Vec<PriceBar>> for PriceSeries {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}
