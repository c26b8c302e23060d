//! Pipeline error taxonomy.
//!
//! Every variant is recoverable at the presentation boundary: the caller
//! aborts the current request and shows the message. Nothing here retries.

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::DataError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid date range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no data available for {symbol} between {start} and {end}")]
    DataUnavailable {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("insufficient data: need at least {required} price bars to fit a trend, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("symbol '{symbol}' is not in the configured symbol list")]
    UnknownSymbol { symbol: String },

    #[error("forecast horizon must be a positive number of days")]
    InvalidHorizon,

    #[error("cannot advance past {date}: date out of range")]
    DateOutOfRange { date: NaiveDate },

    #[error("provider error: {0}")]
    Provider(#[from] DataError),
}

impl PipelineError {
    /// True for errors caused by the request parameters rather than the data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidRange { .. }
                | PipelineError::UnknownSymbol { .. }
                | PipelineError::InvalidHorizon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        let err = PipelineError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: start 2024-03-01 must be before end 2024-03-01"
        );

        let err = PipelineError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert!(err.to_string().contains("got 1"));
    }

    #[test]
    fn validation_classification() {
        assert!(PipelineError::InvalidHorizon.is_validation());
        assert!(PipelineError::UnknownSymbol { symbol: "TSLA".into() }.is_validation());
        assert!(!PipelineError::InsufficientData {
            required: 2,
            actual: 0
        }
        .is_validation());
        assert!(!PipelineError::Provider(DataError::Other("boom".into())).is_validation());
    }
}
