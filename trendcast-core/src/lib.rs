//! TrendCast Core: the fetch → fit → extrapolate → merge pipeline.
//!
//! This crate contains everything below the presentation layer:
//! - Domain types (price bars, historical series, forecast points, combined series)
//! - Data Source Adapter over swappable providers (Yahoo Finance, CSV files)
//! - Forecast Engine: closed-form OLS trend on the row index
//! - Series merge with date dedupe (history wins) and non-finite filtering
//! - Pipeline entry point and TOML configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod merge;
pub mod pipeline;

pub use config::{AppConfig, ConfigError};
pub use domain::{CombinedRow, CombinedSeries, ForecastPoint, HistoricalSeries, Origin, PriceBar};
pub use error::PipelineError;
pub use forecast::{DateStep, LinearTrend};
pub use pipeline::{run_forecast, ForecastReport, ForecastRequest, PipelineSettings};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: pipeline types can cross a thread boundary.
    ///
    /// Presentation layers are free to move a finished report to another
    /// thread; this breaks the build if a non-Send field sneaks in.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceBar>();
        require_sync::<PriceBar>();
        require_send::<HistoricalSeries>();
        require_sync::<HistoricalSeries>();
        require_send::<ForecastPoint>();
        require_sync::<ForecastPoint>();
        require_send::<CombinedSeries>();
        require_sync::<CombinedSeries>();
        require_send::<LinearTrend>();
        require_sync::<LinearTrend>();
        require_send::<ForecastReport>();
        require_sync::<ForecastReport>();
        require_send::<PipelineError>();
        require_sync::<PipelineError>();
        require_send::<AppConfig>();
        require_sync::<AppConfig>();
    }

    /// Architecture contract: providers are trait objects.
    ///
    /// The pipeline only ever sees `&dyn DataProvider`, so the Yahoo and CSV
    /// providers stay interchangeable and tests can inject a mock.
    #[test]
    fn data_provider_is_object_safe() {
        fn _check(provider: &dyn data::DataProvider) -> &str {
            provider.name()
        }
    }
}
