pub mod time;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// Trailing lookback window for a daily price history.
///
/// # Invariants
/// - The same window is used for display and for model training.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum HistoryWindow {
    // 1 month
    OneMonth,
    // 3 months
    ThreeMonths,
    // 6 months
    SixMonths,
    // 1 year
    OneYear,
    // 2 years
    #[default]
    TwoYears,
    // 5 years
    FiveYears,
}

impl HistoryWindow {
    /// # Summary
    /// Calendar span covered by the window.
    ///
    /// # Logic
    /// Months are approximated as 30 days and years as 365 days; the
    /// provider returns whatever trading days fall inside the span.
    ///
    /// # Returns
    /// The span as a `chrono::Duration`.
    pub fn span(&self) -> chrono::Duration {
        match self {
            HistoryWindow::OneMonth => chrono::Duration::days(30),
            HistoryWindow::ThreeMonths => chrono::Duration::days(90),
            HistoryWindow::SixMonths => chrono::Duration::days(180),
            HistoryWindow::OneYear => chrono::Duration::days(365),
            HistoryWindow::TwoYears => chrono::Duration::days(730),
            HistoryWindow::FiveYears => chrono::Duration::days(1825),
        }
    }
}

impl FromStr for HistoryWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(HistoryWindow::OneMonth),
            "3mo" => Ok(HistoryWindow::ThreeMonths),
            "6mo" => Ok(HistoryWindow::SixMonths),
            "1y" => Ok(HistoryWindow::OneYear),
            "2y" => Ok(HistoryWindow::TwoYears),
            "5y" => Ok(HistoryWindow::FiveYears),
            _ => Err(format!("Unknown HistoryWindow: {}", s)),
        }
    }
}

impl std::fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryWindow::OneMonth => write!(f, "1mo"),
            HistoryWindow::ThreeMonths => write!(f, "3mo"),
            HistoryWindow::SixMonths => write!(f, "6mo"),
            HistoryWindow::OneYear => write!(f, "1y"),
            HistoryWindow::TwoYears => write!(f, "2y"),
            HistoryWindow::FiveYears => write!(f, "5y"),
        }
    }
}

/// # Summary
/// Level of detail requested by the dashboard.
///
/// # Invariants
/// - Only `Expert` triggers the forecast model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    // Summary and suggestion only
    #[default]
    Basic,
    // Adds chart and forecast
    Expert,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(ViewMode::Basic),
            "expert" => Ok(ViewMode::Expert),
            _ => Err(format!("Unknown ViewMode: {}", s)),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Basic => write!(f, "basic"),
            ViewMode::Expert => write!(f, "expert"),
        }
    }
}
