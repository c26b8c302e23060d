//! ForecastPoint: one extrapolated close.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Predicted close for a date after the last historical bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_close: f64,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, predicted_close: f64) -> Self {
        Self {
            date,
            predicted_close,
        }
    }
}
