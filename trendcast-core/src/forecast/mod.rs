//! Forecast Engine: OLS trend on the row index, extrapolated forward.

pub mod engine;
pub mod step;
pub mod trend;

pub use engine::{extrapolate, forecast, Extrapolation};
pub use step::DateStep;
pub use trend::{LinearTrend, MIN_FIT_POINTS};
