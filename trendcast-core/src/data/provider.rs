//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV files)
//! so we can swap implementations and mock for tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceBar;

/// Provider-level failures.
///
/// These are displayable in both CLI and TUI contexts. None of them is
/// retried; the presentation layer shows the message and the user decides.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<PriceBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvFile,
}

/// Trait for data providers.
///
/// Providers return raw bars for `[start, end)`; ordering, dedupe and the
/// empty-result check happen in [`super::fetch_history`], not here.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closes for a symbol. `end` is exclusive.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}
