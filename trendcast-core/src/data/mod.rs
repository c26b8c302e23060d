//! Data Source Adapter: providers, the symbol allow-list and the fetch entry point.

pub mod csv_provider;
pub mod fetch;
pub mod provider;
pub mod symbols;
pub mod yahoo;

pub use csv_provider::CsvProvider;
pub use fetch::{fetch_history, validate_range};
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use symbols::SymbolList;
pub use yahoo::YahooProvider;

use crate::config::{ProviderConfig, ProviderKind};

/// Build the provider selected in the config.
pub fn build_provider(config: &ProviderConfig) -> Result<Box<dyn DataProvider>, DataError> {
    match config.kind {
        ProviderKind::Yahoo => Ok(Box::new(YahooProvider::new(config)?)),
        ProviderKind::Csv => Ok(Box::new(CsvProvider::new(&config.csv_dir))),
    }
}
