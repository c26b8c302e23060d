//! Pipeline entry point used by every presentation layer.
//!
//! validate → fetch → fit/extrapolate → merge. Each call is independent;
//! nothing is cached between requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::data::{fetch_history, validate_range, DataProvider, SymbolList};
use crate::domain::{CombinedRow, CombinedSeries, ForecastPoint, HistoricalSeries};
use crate::error::PipelineError;
use crate::forecast::{extrapolate, DateStep, LinearTrend};
use crate::merge::merge;

/// Parameters collected by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub horizon: usize,
}

impl ForecastRequest {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate, horizon: usize) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            horizon,
        }
    }

    /// Check symbol, range and horizon, in that order. Returns the
    /// normalized symbol.
    pub fn validate(&self, symbols: &SymbolList) -> Result<String, PipelineError> {
        let symbol = symbols.resolve(&self.symbol)?;
        validate_range(self.start, self.end)?;
        if self.horizon == 0 {
            return Err(PipelineError::InvalidHorizon);
        }
        Ok(symbol)
    }
}

/// Settings that do not change per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSettings {
    pub symbols: SymbolList,
    pub date_step: DateStep,
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            symbols: config.symbols.clone(),
            date_step: config.forecast.date_step,
        }
    }
}

/// Everything a presentation layer needs to render one request.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub request: ForecastRequest,
    pub date_step: DateStep,
    pub historical: HistoricalSeries,
    pub trend: LinearTrend,
    pub forecast: Vec<ForecastPoint>,
    pub combined: CombinedSeries,
}

impl ForecastReport {
    /// The last `horizon` rows of the combined series.
    pub fn table_rows(&self) -> &[CombinedRow] {
        self.combined.tail(self.request.horizon)
    }
}

pub fn run_forecast(
    request: &ForecastRequest,
    provider: &dyn DataProvider,
    settings: &PipelineSettings,
) -> Result<ForecastReport, PipelineError> {
    let symbol = request.validate(&settings.symbols)?;
    tracing::info!(
        %symbol,
        start = %request.start,
        end = %request.end,
        horizon = request.horizon,
        step = %settings.date_step,
        "forecast requested"
    );

    let historical = fetch_history(provider, &settings.symbols, &symbol, request.start, request.end)?;
    let extrapolation = extrapolate(&historical, request.horizon, settings.date_step)?;
    let combined = merge(&historical, &extrapolation.points);

    tracing::info!(
        %symbol,
        historical = historical.len(),
        forecast = extrapolation.points.len(),
        combined = combined.len(),
        "forecast complete"
    );

    Ok(ForecastReport {
        request: ForecastRequest {
            symbol,
            ..request.clone()
        },
        date_step: settings.date_step,
        historical,
        trend: extrapolation.trend,
        forecast: extrapolation.points,
        combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn validate_order_symbol_first() {
        let req = ForecastRequest::new("TSLA", date(1, 5), date(1, 5), 0);
        assert!(matches!(
            req.validate(&SymbolList::default()),
            Err(PipelineError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn validate_range_before_horizon() {
        let req = ForecastRequest::new("AAPL", date(2, 1), date(1, 1), 0);
        assert!(matches!(
            req.validate(&SymbolList::default()),
            Err(PipelineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn validate_horizon() {
        let req = ForecastRequest::new("AAPL", date(1, 1), date(2, 1), 0);
        assert!(matches!(
            req.validate(&SymbolList::default()),
            Err(PipelineError::InvalidHorizon)
        ));
        let req = ForecastRequest::new("aapl", date(1, 1), date(2, 1), 30);
        assert_eq!(req.validate(&SymbolList::default()).unwrap(), "AAPL");
    }

    #[test]
    fn settings_from_config() {
        let mut config = AppConfig::default();
        config.forecast.date_step = DateStep::Weekday;
        let settings = PipelineSettings::from(&config);
        assert_eq!(settings.date_step, DateStep::Weekday);
        assert_eq!(settings.symbols, SymbolList::default());
    }
}
