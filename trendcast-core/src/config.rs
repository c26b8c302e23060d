//! TOML configuration.
//!
//! Every table and field is optional; anything missing falls back to the
//! defaults below. The file lives at `<config_dir>/trendcast/config.toml`
//! unless a path is given explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::SymbolList;
use crate::forecast::DateStep;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which market-data provider to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    /// Caller-imposed bound on the single blocking fetch.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Directory of `<SYMBOL>.csv` files for the CSV provider.
    pub csv_dir: PathBuf,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            base_url: "https://query2.finance.yahoo.com".into(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into(),
            csv_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub default_horizon: usize,
    /// Default history window, counted back from today.
    pub lookback_days: i64,
    pub date_step: DateStep,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: 30,
            lookback_days: 365,
            date_step: DateStep::CalendarDay,
        }
    }
}

/// Largest accepted `forecast.lookback_days` (about a century).
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

impl ForecastConfig {
    /// `[today - lookback_days, today)`.
    pub fn default_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        let start = u64::try_from(self.lookback_days)
            .ok()
            .and_then(|days| today.checked_sub_days(chrono::Days::new(days)))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "forecast.lookback_days = {} reaches before the start of the calendar",
                    self.lookback_days
                ))
            })?;
        Ok((start, today))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub symbols: SymbolList,
    pub forecast: ForecastConfig,
}

impl AppConfig {
    /// Default config location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trendcast").join("config.toml"))
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from an explicit path (must exist) or from the default location
    /// (defaults when absent).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("symbols.allowed must not be empty".into()));
        }
        if self.forecast.default_horizon == 0 {
            return Err(ConfigError::Invalid("forecast.default_horizon must be > 0".into()));
        }
        if self.forecast.lookback_days <= 0 {
            return Err(ConfigError::Invalid("forecast.lookback_days must be > 0".into()));
        }
        if self.forecast.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(ConfigError::Invalid(format!(
                "forecast.lookback_days must be <= {MAX_LOOKBACK_DAYS}"
            )));
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid("provider.timeout_secs must be > 0".into()));
        }
        Ok(())
    }
}
