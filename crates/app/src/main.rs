mod logging;
mod settings;

use std::sync::Arc;
use std::time::Duration;

use cacao_analysis::forecast::Forecaster;
use cacao_analysis::forest::ForestParams;
use cacao_analysis::pipeline::Analyzer;
use cacao_api::server::{AppState, DashboardSettings};
use cacao_cache::mem::MemCache;
use cacao_core::common::HistoryWindow;
use cacao_core::common::time::RealTimeProvider;
use cacao_core::units::UnitConverter;
use cacao_feed::yahoo::YahooProvider;
use cacao_market::history::HistoryService;
use tracing::info;

/// # Summary
/// Entry point and DI container.
///
/// # Logic
/// 1. Load configuration (optional path as first argument).
/// 2. Initialize logging.
/// 3. Build infrastructure: Yahoo feed, TTL cache, clock.
/// 4. Build the acquisition service and the analysis pipeline.
/// 5. Serve the API until ctrl-c.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration
    let config_path = std::env::args().nth(1);
    let config = settings::load(config_path.as_deref())?;

    // 2. Logging
    let _log_guard = logging::init(&config.log);
    info!("Cacao dashboard starting...");

    let window: HistoryWindow = config.market.window.parse()?;

    // 3. Infrastructure
    let clock = Arc::new(RealTimeProvider);
    let feed = Arc::new(YahooProvider::new()?);
    let cache = Arc::new(MemCache::with_clock(clock.clone()));

    // 4. Domain services
    let history = HistoryService::new(
        feed,
        cache,
        clock,
        Duration::from_secs(config.market.cache_ttl_secs),
    );
    let analyzer = Analyzer::new(Forecaster::new(ForestParams::from(&config.forecast)));

    let state = AppState {
        history: Arc::new(history),
        analyzer: Arc::new(analyzer),
        settings: Arc::new(DashboardSettings {
            symbol: config.market.symbol.clone(),
            window,
        }),
        converter: UnitConverter::new(config.display.conversion_factor),
    };
    info!(
        symbol = %config.market.symbol,
        %window,
        ttl_secs = config.market.cache_ttl_secs,
        "dashboard wired"
    );

    // 5. Serve until interrupted
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tokio::select! {
        result = cacao_api::server::start_server(state, &bind_addr) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
