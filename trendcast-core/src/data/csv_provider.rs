//! CSV file provider for offline use.
//!
//! Reads `<dir>/<SYMBOL>.csv` with a `date,close` header. Yahoo-style exports
//! (`Date,Open,High,Low,Close,Adj Close,Volume`) work too: extra columns are
//! ignored and the capitalised headers are accepted as aliases.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::PriceBar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Close")]
    close: Option<f64>,
}

pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_file"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no CSV file for symbol");
            return Ok(FetchResult {
                symbol: symbol.to_string(),
                bars: Vec::new(),
                source: DataSource::CsvFile,
            });
        }

        let mut reader = csv::Reader::from_path(&path)
            .map_err(|e| DataError::Io(format!("{}: {e}", path.display())))?;

        let mut bars = Vec::new();
        for (line, record) in reader.deserialize::<CsvRow>().enumerate() {
            let row = record.map_err(|e| {
                DataError::ResponseFormatChanged(format!(
                    "{} row {}: {e}",
                    path.display(),
                    line + 2
                ))
            })?;
            let Some(close) = row.close else {
                continue;
            };
            if row.date >= start && row.date < end {
                bars.push(PriceBar::new(row.date, close));
            }
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvFile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn reads_simple_csv_within_range() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("AAPL.csv"),
            "date,close\n2024-03-01,170.5\n2024-03-04,171.0\n2024-03-05,\n2024-03-06,169.9\n",
        )
        .unwrap();

        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("AAPL", date(1), date(6)).unwrap();
        assert_eq!(result.source, DataSource::CsvFile);
        assert_eq!(
            result.bars,
            vec![
                PriceBar::new(date(1), 170.5),
                PriceBar::new(date(4), 171.0)
            ]
        );
    }

    #[test]
    fn reads_yahoo_style_export() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("MSFT.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-03-01,410.0,415.9,408.0,415.5,414.2,17000000\n\
             2024-03-04,413.4,417.3,412.3,414.9,413.6,17500000\n",
        )
        .unwrap();

        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("MSFT", date(1), date(31)).unwrap();
        assert_eq!(result.bars.len(), 2);
        assert_eq!(result.bars[1].close, 414.9);
    }

    #[test]
    fn missing_file_is_an_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CsvProvider::new(dir.path());
        let result = provider.fetch("GOOGL", date(1), date(31)).unwrap();
        assert!(result.bars.is_empty());
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("AMZN.csv"), "date,close\n2024-03-01,abc\n").unwrap();
        let provider = CsvProvider::new(dir.path());
        match provider.fetch("AMZN", date(1), date(31)) {
            Err(DataError::ResponseFormatChanged(msg)) => assert!(msg.contains("row 2")),
            other => panic!("expected format error, got {other:?}"),
        }
    }
}
