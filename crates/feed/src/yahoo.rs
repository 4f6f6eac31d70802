use async_trait::async_trait;
use cacao_core::market::entity::{PriceBar, PriceSeries};
use cacao_core::market::error::MarketError;
use cacao_core::market::port::PriceHistoryProvider;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// # Summary
/// Yahoo Finance daily history provider.
///
/// # Invariants
/// - Uses one shared `reqwest` async client.
/// - One `fetch_daily` call sends exactly one request.
#[derive(Clone)]
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// # Summary
    /// Creates a provider pointed at the public chart endpoint.
    ///
    /// # Logic
    /// 1. Make sure a rustls crypto provider is installed.
    /// 2. Configure a 10 second timeout.
    /// 3. Send a browser User-Agent; the endpoint rejects bare clients.
    ///
    /// # Returns
    /// The provider, or `MarketError::Network` if the client cannot be built.
    pub fn new() -> Result<Self, MarketError> {
        Self::with_base_url(CHART_URL)
    }

    /// # Summary
    /// Same as `new` but against another chart endpoint (mirrors, tests).
    ///
    /// # Arguments
    /// * `base_url`: URL the symbol is appended to.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MarketError> {
        ensure_crypto_provider();

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

fn ensure_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none()
        && rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
    {
        debug!("rustls crypto provider was installed concurrently");
    }
}

/// # Summary
/// Top level of the v8 chart response.
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Deserialize, Debug)]
struct YahooError {
    description: String,
}

/// # Summary
/// One time series; `timestamp` is absent when the range has no sessions.
#[derive(Deserialize, Debug)]
struct YahooResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Deserialize, Debug)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

/// # Summary
/// Column-oriented OHLCV values, `null` where the session has no print.
#[derive(Deserialize, Debug)]
struct YahooQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// # Summary
/// Turns a decoded chart response into a price series.
///
/// # Logic
/// 1. Surface an API-level error object as `MarketError::Unknown`.
/// 2. Take the single result and its first quote block.
/// 3. Zip the columns by index, keeping only rows with all five values.
///
/// # Returns
/// A chronological, possibly empty, series.
fn into_series(json: YahooResponse) -> Result<PriceSeries, MarketError> {
    if let Some(err) = json.chart.error {
        return Err(MarketError::Unknown(err.description));
    }

    let result = json
        .chart
        .result
        .ok_or(MarketError::NotFound)?
        .pop()
        .ok_or(MarketError::NotFound)?;

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or(MarketError::Parse("No quote data".into()))?;

    let mut bars = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let row = (
            Utc.timestamp_opt(ts, 0).single(),
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        if let (Some(date), Some(open), Some(high), Some(low), Some(close), Some(volume)) = row {
            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = bars.len(), "dropped incomplete rows");
    }
    Ok(PriceSeries::new(bars))
}

#[async_trait]
impl PriceHistoryProvider for YahooProvider {
    /// # Summary
    /// Downloads daily bars from the Yahoo chart endpoint.
    ///
    /// # Logic
    /// 1. Build the URL with `period1`/`period2` as unix seconds and a
    ///    daily interval.
    /// 2. Send once; a transport error or non-2xx status is a
    ///    `MarketError::Network`.
    /// 3. Decode the JSON and convert it into a `PriceSeries`.
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries, MarketError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), symbol);
        debug!(symbol, %start, %end, "requesting daily history");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            warn!(symbol, status = %resp.status(), "history request rejected");
            return Err(MarketError::Network(format!("HTTP {}", resp.status())));
        }

        let json: YahooResponse = resp
            .json()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        into_series(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<PriceSeries, MarketError> {
        let json: YahooResponse = serde_json::from_str(raw).unwrap();
        into_series(json)
    }

    #[test]
    fn test_rows_with_nulls_are_skipped() {
        let raw = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1717344000, 1717430400, 1717516800],
                    "indicators": {
                        "quote": [{
                            "open":   [9800.0, null,   9650.0],
                            "high":   [9900.0, 9850.0, 9700.0],
                            "low":    [9700.0, 9600.0, 9500.0],
                            "close":  [9850.0, 9700.0, 9600.0],
                            "volume": [12000,  11000,  null]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let series = parse(raw).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.bars()[0].close, 9850.0);
        assert_eq!(series.bars()[0].date.timestamp(), 1717344000);
    }

    #[test]
    fn test_api_error_is_reported() {
        let raw = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        match parse(raw) {
            Err(MarketError::Unknown(msg)) => assert!(msg.contains("delisted")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_result_is_not_found() {
        let raw = r#"{"chart": {"result": [], "error": null}}"#;
        assert!(matches!(parse(raw), Err(MarketError::NotFound)));
    }

    #[test]
    fn test_empty_range_yields_empty_series() {
        let raw = r#"{"chart": {"result": [{"indicators": {"quote": [{}]}}], "error": null}}"#;
        let series = parse(raw).unwrap();
        assert!(series.is_empty());
    }
}
