//! PriceBar and the canonical historical series built from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily closing price for a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// A bar is usable for fitting only when its close is a finite number.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite()
    }
}

/// Ordered, deduplicated daily closes for one symbol.
///
/// Invariant: dates strictly increasing and every close finite. Construction
/// sorts, drops duplicate dates (first occurrence wins) and drops non-finite
/// closes. There are no mutating methods once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl HistoricalSeries {
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        let symbol = symbol.into();
        let received = bars.len();

        bars.retain(PriceBar::is_valid);
        // Stable sort: equal dates keep arrival order, so dedup keeps the first.
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        let dropped = received - bars.len();
        if dropped > 0 {
            tracing::warn!(%symbol, dropped, "dropped duplicate or non-numeric bars");
        }

        Self { symbol, bars }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Closing prices in chronological order; index == row position.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.bars.binary_search_by_key(&date, |b| b.date).is_ok()
    }
}
