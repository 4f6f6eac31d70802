use cacao_core::market::port::PriceHistoryProvider;
use cacao_feed::yahoo::YahooProvider;
use chrono::{Duration as ChronoDuration, Utc};

/// # Summary
/// Live fetch of the cocoa futures contract.
///
/// # Logic
/// 1. Build a `YahooProvider`.
/// 2. Request the last 30 days of `CC=F`.
/// 3. Expect a non-empty, chronologically ordered series.
#[tokio::test]
#[ignore = "requires network access to Yahoo Finance"]
async fn test_yahoo_real_fetch() {
    let provider = YahooProvider::new().unwrap();
    let end = Utc::now();
    let start = end - ChronoDuration::days(30);

    let result = provider.fetch_daily("CC=F", start, end).await;
    assert!(
        result.is_ok(),
        "Failed to fetch real data from Yahoo: {:?}",
        result.err()
    );

    let series = result.unwrap();
    assert!(!series.is_empty(), "series should not be empty");
    assert!(series.bars().windows(2).all(|w| w[0].date < w[1].date));

    println!("Fetched {} bars for CC=F", series.len());
    for bar in series.bars() {
        println!("{}: close = {}", bar.date, bar.close);
    }
}

/// # Summary
/// An unreachable endpoint must come back as an error, not a panic.
#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let provider = YahooProvider::with_base_url("http://127.0.0.1:9/v8/finance/chart").unwrap();
    let end = Utc::now();
    let start = end - ChronoDuration::days(7);

    let result = provider.fetch_daily("CC=F", start, end).await;
    assert!(result.is_err());
}
