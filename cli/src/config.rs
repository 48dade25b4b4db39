//! TOML configuration loading and validation.
//!
//! Every section is optional. An empty file, or no file at all, reproduces
//! the default behavior: `orders.csv`, intraday (`MIS`) completed orders, and
//! the NSE charge schedule.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use intraday_pnl::{ChargeSchedule, RowFilter};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub filter: RowFilter,
    pub charges: ChargeSchedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// File name searched for next to the binary and in the downloads folder
    pub file_name: String,
    /// Explicit order log path; skips the search when set
    pub path: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file_name: "orders.csv".into(),
            path: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Load the config file if one was given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.input.file_name.trim().is_empty() {
            return Err(Error::Config("input.file_name must not be empty".into()));
        }
        if self.filter.product.is_empty() {
            return Err(Error::Config("filter.product must not be empty".into()));
        }
        if self.filter.status.is_empty() {
            return Err(Error::Config("filter.status must not be empty".into()));
        }
        self.charges
            .validate()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
