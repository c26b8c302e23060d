//! CombinedSeries: history plus forecast on one timeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a combined row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Historical,
    Forecast,
}

impl Origin {
    pub fn label(self) -> &'static str {
        match self {
            Origin::Historical => "historical",
            Origin::Forecast => "forecast",
        }
    }
}

/// A single row of the combined series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub date: NaiveDate,
    pub close: f64,
    pub origin: Origin,
}

/// Date-ordered rows with unique dates and finite closes.
///
/// Built by [`crate::merge::merge`]; the presentation layer decides how much
/// of it to show via [`CombinedSeries::tail`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombinedSeries {
    rows: Vec<CombinedRow>,
}

impl CombinedSeries {
    /// Callers must pass rows already sorted by unique date.
    pub(crate) fn from_sorted_rows(rows: Vec<CombinedRow>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
        Self { rows }
    }

    pub fn rows(&self) -> &[CombinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The last `n` rows (all of them if `n` exceeds the length).
    pub fn tail(&self, n: usize) -> &[CombinedRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }

    pub fn historical_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.origin == Origin::Historical)
            .count()
    }

    pub fn forecast_count(&self) -> usize {
        self.rows.len() - self.historical_count()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&CombinedRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }
}
