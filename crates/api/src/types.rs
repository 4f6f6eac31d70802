//! # DTO layer
//!
//! View models returned to the dashboard client. Monetary values are
//! emitted as strings rounded to cents; every DTO derives `ToSchema` so it
//! shows up in the Swagger document.

use cacao_core::analysis::entity::{Analysis, ForecastStatus, Signal, Trend};
use cacao_core::analysis::error::AnalysisError;
use cacao_core::common::ViewMode;
use cacao_core::market::entity::PriceSeries;
use cacao_core::sale::entity::SaleLogEntry;
use cacao_core::units::UnitConverter;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Rounds a price to cents for display; non-finite values become "n/a".
pub fn money(value: f64) -> String {
    Decimal::from_f64_retain(value)
        .map(|d| {
            let mut cents = d.round_dp(2);
            cents.rescale(2);
            cents.to_string()
        })
        .unwrap_or_else(|| "n/a".to_string())
}

// ============================================================
//  Dashboard DTOs
// ============================================================

/// Whether the dashboard has a signal to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardState {
    Ready,
    Unavailable,
}

/// Daily summary panel (per quintal)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    /// Latest close per quintal
    #[schema(example = "372.13")]
    pub price_per_quintal: String,
    /// Change versus the previous close, per quintal
    #[schema(example = "-4.21")]
    pub change_per_quintal: String,
    /// "rising" or "falling"
    #[schema(example = "rising")]
    pub trend: String,
}

/// Color-coded suggestion panel
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuggestionResponse {
    /// True when the price is at or above its weekly average
    pub favorable: bool,
    #[schema(example = "Good moment to sell")]
    pub headline: String,
    pub detail: String,
}

/// One point of the closing price chart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    #[schema(example = "2025-06-02")]
    pub date: NaiveDate,
    /// Close per ton, unrounded
    pub close: f64,
}

/// Forecast block status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ForecastState {
    Ready,
    Pending,
}

/// Next-day forecast block
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastResponse {
    pub status: ForecastState,
    #[schema(example = "8245.70")]
    pub price_per_ton: Option<String>,
    #[schema(example = "374.02")]
    pub price_per_quintal: Option<String>,
    pub message: String,
}

/// Expert panel: chart plus forecast
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpertResponse {
    #[schema(example = "8203.50")]
    pub price_per_ton: String,
    #[schema(example = "368.90")]
    pub average_7d_per_quintal: String,
    pub chart: Vec<ChartPoint>,
    pub forecast: ForecastResponse,
}

/// Complete dashboard view model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = "CC=F")]
    pub symbol: String,
    #[schema(example = "basic")]
    pub mode: String,
    pub state: DashboardState,
    /// Present when `state` is `unavailable`
    pub message: Option<String>,
    pub summary: Option<SummaryResponse>,
    pub suggestion: Option<SuggestionResponse>,
    /// Present in expert mode only
    pub expert: Option<ExpertResponse>,
}

impl DashboardResponse {
    /// # Summary
    /// View model for a dashboard without usable data.
    ///
    /// # Logic
    /// DataUnavailable and InsufficientData read the same to the user: try
    /// again shortly.
    pub fn unavailable(symbol: &str, mode: ViewMode, err: &AnalysisError) -> Self {
        tracing::debug!(symbol, error = %err, "rendering unavailable dashboard");
        Self {
            symbol: symbol.to_string(),
            mode: mode.to_string(),
            state: DashboardState::Unavailable,
            message: Some(
                "Market data is unavailable right now. Please wait a minute and reload."
                    .to_string(),
            ),
            summary: None,
            suggestion: None,
            expert: None,
        }
    }

    /// # Summary
    /// View model for a successful pipeline run.
    ///
    /// # Arguments
    /// * `symbol`: watched ticker.
    /// * `mode`: requested view.
    /// * `series`: history the analysis was computed from (chart source).
    /// * `analysis`: pipeline output.
    /// * `conv`: ton-to-quintal converter for displayed figures.
    pub fn ready(
        symbol: &str,
        mode: ViewMode,
        series: &PriceSeries,
        analysis: &Analysis,
        conv: UnitConverter,
    ) -> Self {
        let signal = &analysis.signal;
        let expert = match mode {
            ViewMode::Basic => None,
            ViewMode::Expert => Some(ExpertResponse::new(series, analysis, conv)),
        };

        Self {
            symbol: symbol.to_string(),
            mode: mode.to_string(),
            state: DashboardState::Ready,
            message: None,
            summary: Some(SummaryResponse::new(signal, conv)),
            suggestion: Some(SuggestionResponse::from(signal)),
            expert,
        }
    }
}

impl SummaryResponse {
    fn new(signal: &Signal, conv: UnitConverter) -> Self {
        Self {
            price_per_quintal: money(conv.per_quintal(signal.current_price)),
            change_per_quintal: money(conv.per_quintal(signal.delta)),
            trend: match signal.trend {
                Trend::Rising => "rising".to_string(),
                Trend::Falling => "falling".to_string(),
            },
        }
    }
}

impl From<&Signal> for SuggestionResponse {
    fn from(signal: &Signal) -> Self {
        if signal.favorable {
            Self {
                favorable: true,
                headline: "Good moment to sell".to_string(),
                detail: "The price is above its weekly average.".to_string(),
            }
        } else {
            Self {
                favorable: false,
                headline: "Wait".to_string(),
                detail: "The price is below its weekly average. If there is no hurry, waiting for it to rise may pay off."
                    .to_string(),
            }
        }
    }
}

impl ExpertResponse {
    fn new(series: &PriceSeries, analysis: &Analysis, conv: UnitConverter) -> Self {
        let chart = series
            .bars()
            .iter()
            .map(|b| ChartPoint {
                date: b.date.date_naive(),
                close: b.close,
            })
            .collect();

        Self {
            price_per_ton: money(analysis.signal.current_price),
            average_7d_per_quintal: money(conv.per_quintal(analysis.signal.avg_7d)),
            chart,
            forecast: ForecastResponse::new(&analysis.forecast, conv),
        }
    }
}

impl ForecastResponse {
    fn new(status: &ForecastStatus, conv: UnitConverter) -> Self {
        match status {
            ForecastStatus::Ready(result) => Self {
                status: ForecastState::Ready,
                price_per_ton: Some(money(result.predicted_next_price)),
                price_per_quintal: Some(money(conv.per_quintal(result.predicted_next_price))),
                message: format!(
                    "Forecast for tomorrow, trained on {} days",
                    result.training_examples
                ),
            },
            ForecastStatus::Failed(_) | ForecastStatus::Skipped => Self {
                status: ForecastState::Pending,
                price_per_ton: None,
                price_per_quintal: None,
                message: "The model is still calculating. Reload in a few seconds.".to_string(),
            },
        }
    }
}

/// `mode` query parameter
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DashboardQuery {
    pub mode: Option<String>,
}

// ============================================================
//  Sale log DTOs
// ============================================================

/// Sale log form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleRequest {
    #[schema(example = "2025-06-02")]
    pub date: NaiveDate,
    /// Quintals sold
    #[schema(example = 12.5)]
    pub quantity: f64,
}

impl From<SaleRequest> for SaleLogEntry {
    fn from(req: SaleRequest) -> Self {
        SaleLogEntry {
            date: req.date,
            quantity: req.quantity,
        }
    }
}

/// Transient confirmation for a logged sale
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaleReceipt {
    pub id: Uuid,
    #[schema(example = "Sale recorded")]
    pub message: String,
}

/// Liveness payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

// ============================================================
//  Envelopes
// ============================================================

/// Uniform success envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// Whether the call succeeded
    pub success: bool,
    /// Payload (on success)
    pub data: Option<T>,
    /// Error text (on failure)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// Builds a success envelope
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Failure envelope without payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Always false
    pub success: bool,
    pub error: String,
}

impl ApiErrorResponse {
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cacao_core::analysis::entity::ForecastResult;
    use cacao_core::analysis::error::ForecastError;
    use cacao_core::market::entity::PriceBar;
    use chrono::{TimeZone, Utc};

    fn signal(favorable: bool) -> Signal {
        Signal {
            current_price: 22_046.0,
            previous_price: 21_825.54,
            delta: 220.46,
            avg_7d: 11_023.0,
            favorable,
            trend: Trend::Rising,
        }
    }

    fn series() -> PriceSeries {
        let date = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        PriceSeries::new(vec![PriceBar {
            date,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 22_046.0,
            volume: 1.0,
        }])
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(372.126), "372.13");
        assert_eq!(money(-4.2), "-4.20");
        assert_eq!(money(f64::NAN), "n/a");
    }

    #[test]
    fn test_summary_is_per_quintal() {
        let analysis = Analysis {
            signal: signal(true),
            forecast: ForecastStatus::Skipped,
        };
        let view = DashboardResponse::ready(
            "CC=F",
            ViewMode::Basic,
            &series(),
            &analysis,
            UnitConverter::default(),
        );

        let summary = view.summary.unwrap();
        assert_eq!(summary.price_per_quintal, "1000.00");
        assert_eq!(summary.change_per_quintal, "10.00");
        assert_eq!(summary.trend, "rising");
        assert!(view.suggestion.unwrap().favorable);
        assert!(view.expert.is_none());
    }

    #[test]
    fn test_expert_view_with_ready_forecast() {
        let analysis = Analysis {
            signal: signal(false),
            forecast: ForecastStatus::Ready(ForecastResult {
                predicted_next_price: 44_092.0,
                training_examples: 29,
            }),
        };
        let view = DashboardResponse::ready(
            "CC=F",
            ViewMode::Expert,
            &series(),
            &analysis,
            UnitConverter::default(),
        );

        assert!(!view.suggestion.unwrap().favorable);
        let expert = view.expert.unwrap();
        assert_eq!(expert.price_per_ton, "22046.00");
        assert_eq!(expert.average_7d_per_quintal, "500.00");
        assert_eq!(expert.chart.len(), 1);
        assert_eq!(expert.forecast.status, ForecastState::Ready);
        assert_eq!(expert.forecast.price_per_quintal.as_deref(), Some("2000.00"));
    }

    #[test]
    fn test_failed_forecast_is_pending() {
        let analysis = Analysis {
            signal: signal(true),
            forecast: ForecastStatus::Failed(ForecastError::InvalidFeatures),
        };
        let view = DashboardResponse::ready(
            "CC=F",
            ViewMode::Expert,
            &series(),
            &analysis,
            UnitConverter::default(),
        );

        let forecast = view.expert.unwrap().forecast;
        assert_eq!(forecast.status, ForecastState::Pending);
        assert!(forecast.price_per_ton.is_none());
        // summary still rendered
        assert!(view.summary.is_some());
    }

    #[test]
    fn test_unavailable_view_has_no_panels() {
        let err = AnalysisError::InsufficientData { bars: 1 };
        let view = DashboardResponse::unavailable("CC=F", ViewMode::Expert, &err);

        assert_eq!(view.state, DashboardState::Unavailable);
        assert!(view.message.is_some());
        assert!(view.summary.is_none() && view.suggestion.is_none() && view.expert.is_none());
    }
}
