use cacao_core::market::entity::{PriceBar, PriceSeries};
use chrono::{TimeZone, Utc};

/// Bars with the given closes on consecutive days; other fields derived from close
pub(crate) fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .zip(0i64..)
        .map(|(&close, day)| PriceBar {
            date: base + chrono::Duration::days(day),
            open: close - 5.0,
            high: close + 20.0,
            low: close - 20.0,
            close,
            volume: 10_000.0 + close,
        })
        .collect::<Vec<_>>()
        .into()
}
