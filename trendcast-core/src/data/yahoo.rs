//! Yahoo Finance data provider.
//!
//! Fetches daily closes from Yahoo's v8 chart API with a single blocking
//! request. The client timeout comes from config; there is no retry loop.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.
//! The CSV provider is the fallback when Yahoo is unavailable.

use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::config::ProviderConfig;
use crate::domain::PriceBar;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    timeout: Duration,
}

impl YahooProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, DataError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Build the chart API URL. `period2` is midnight UTC of `end`, so the
    /// end date itself is excluded.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::default()).and_utc().timestamp();
        let end_ts = end.and_time(chrono::NaiveTime::default()).and_utc().timestamp();
        format!(
            "{}/v8/finance/chart/{symbol}?period1={start_ts}&period2={end_ts}&interval=1d",
            self.base_url
        )
    }

    /// Parse the chart API response into bars inside `[start, end)`.
    fn parse_response(
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        resp: ChartResponse,
    ) -> Result<Vec<PriceBar>, DataError> {
        let result = match (resp.chart.result, resp.chart.error) {
            (Some(result), _) => result,
            (None, Some(err)) if err.code == "Not Found" => {
                return Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            }
            (None, Some(err)) => {
                return Err(DataError::ResponseFormatChanged(format!(
                    "{}: {}",
                    err.code, err.description
                )))
            }
            (None, None) => {
                return Err(DataError::ResponseFormatChanged(
                    "empty result with no error".into(),
                ))
            }
        };

        let Some(data) = result.into_iter().next() else {
            return Ok(Vec::new());
        };

        // No timestamps means no trading days in the window.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Exchange-local date, not the UTC date of the session open.
            let date = chrono::DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;

            let Some(close) = closes.get(i).copied().flatten() else {
                continue;
            };

            if date >= start && date < end {
                bars.push(PriceBar::new(date, close));
            }
        }

        Ok(bars)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> DataError {
        if e.is_timeout() {
            DataError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            DataError::NetworkUnreachable(e.to_string())
        }
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let url = self.chart_url(symbol, start, end);
        tracing::debug!(%url, "requesting chart data");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let bars = Self::parse_response(symbol, start, end, chart)?;
        tracing::debug!(%symbol, bars = bars.len(), "parsed chart data");

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::YahooFinance,
        })
    }
}
