//! Domain types for TrendCast

pub mod bar;
pub mod combined;
pub mod forecast_point;

pub use bar::{HistoricalSeries, PriceBar};
pub use combined::{CombinedRow, CombinedSeries, Origin};
pub use forecast_point::ForecastPoint;

/// Date format shared by every date the pipeline emits.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
