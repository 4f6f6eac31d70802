use serde::{Deserialize, Serialize};

/// Global application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub market: MarketConfig,
    pub display: DisplayConfig,
    pub forecast: ForecastConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which series to watch and how long a fetched history stays fresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub symbol: String,
    // Parsed into `HistoryWindow` (e.g. "2y")
    pub window: String,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Quintals per metric ton
    pub conversion_factor: f64,
}

/// Regression forest hyper-parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub n_estimators: usize,
    pub seed: u64,
    pub min_samples_split: usize,
    // None grows trees until leaves are pure
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    // EnvFilter directive used when RUST_LOG is unset
    pub level: String,
    // Daily rolling log files go here when set
    pub dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            symbol: "CC=F".to_string(),
            window: "2y".to_string(),
            cache_ttl_secs: 600,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            conversion_factor: crate::units::QUINTALS_PER_TON,
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            n_estimators: 50,
            seed: 42,
            min_samples_split: 2,
            max_depth: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
