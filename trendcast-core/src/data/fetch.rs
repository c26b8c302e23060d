//! Adapter entry point: validate, fetch, canonicalize.

use chrono::NaiveDate;

use super::provider::{DataError, DataProvider};
use super::symbols::SymbolList;
use crate::domain::HistoricalSeries;
use crate::error::PipelineError;

/// `start` must be strictly before `end`.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), PipelineError> {
    if start >= end {
        return Err(PipelineError::InvalidRange { start, end });
    }
    Ok(())
}

/// Fetch the historical series for `symbol` over `[start, end)`.
///
/// Symbol and range are validated before the provider is touched. An empty
/// result, or a provider that does not know the symbol, is `DataUnavailable`.
pub fn fetch_history(
    provider: &dyn DataProvider,
    symbols: &SymbolList,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HistoricalSeries, PipelineError> {
    let symbol = symbols.resolve(symbol)?;
    validate_range(start, end)?;

    tracing::info!(provider = provider.name(), %symbol, %start, %end, "fetching history");

    let unavailable = |symbol: String| PipelineError::DataUnavailable { symbol, start, end };

    let fetched = match provider.fetch(&symbol, start, end) {
        Ok(fetched) => fetched,
        Err(DataError::SymbolNotFound { symbol }) => return Err(unavailable(symbol)),
        Err(e) => return Err(e.into()),
    };

    // Providers should already honour the window; enforce it regardless.
    let bars = fetched
        .bars
        .into_iter()
        .filter(|b| b.date >= start && b.date < end)
        .collect();

    let series = HistoricalSeries::new(symbol, bars);
    if series.is_empty() {
        return Err(unavailable(series.symbol().to_string()));
    }

    tracing::info!(
        symbol = series.symbol(),
        bars = series.len(),
        source = ?fetched.source,
        "history loaded"
    );
    Ok(series)
}
