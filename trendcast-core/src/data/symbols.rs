//! Symbol allow-list.
//!
//! Requests for symbols outside this list are rejected before any provider
//! call. The list lives in the `[symbols]` table of the config file.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolList {
    pub allowed: Vec<String>,
}

impl Default for SymbolList {
    fn default() -> Self {
        Self::default_list()
    }
}

impl SymbolList {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = normalize(symbol.as_ref());
            if !symbol.is_empty() && !allowed.contains(&symbol) {
                allowed.push(symbol);
            }
        }
        Self { allowed }
    }

    pub fn default_list() -> Self {
        Self::new(["AAPL", "GOOGL", "MSFT", "AMZN"])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = normalize(symbol);
        self.allowed.iter().any(|s| normalize(s) == symbol)
    }

    /// Normalize and check a user-supplied symbol.
    pub fn resolve(&self, symbol: &str) -> Result<String, PipelineError> {
        if self.contains(symbol) {
            Ok(normalize(symbol))
        } else {
            Err(PipelineError::UnknownSymbol {
                symbol: symbol.trim().to_string(),
            })
        }
    }

    pub fn position(&self, symbol: &str) -> Option<usize> {
        let symbol = normalize(symbol);
        self.allowed.iter().position(|s| normalize(s) == symbol)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.allowed.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

/// Upper-case, whitespace-trimmed ticker.
pub fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
