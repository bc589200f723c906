//! Rate configuration for compensation assessment
//!
//! The rate table maps a lower-cased district or village name to a rate per
//! unit of land area. It always carries a `default` entry used for unknown
//! locations. The current market rate is kept separately and is only used for
//! market comparisons.
//!
//! ```toml
//! [rates]
//! default = 100000
//! chennai = 150000
//!
//! [market]
//! current_rate_per_unit = 200000
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Government rate applied when no configuration is supplied
pub const DEFAULT_RATE_PER_UNIT: f64 = 100_000.0;

/// Today's market rate applied when no configuration is supplied
pub const DEFAULT_MARKET_RATE_PER_UNIT: f64 = 200_000.0;

/// Key of the mandatory fallback entry
pub const DEFAULT_RATE_KEY: &str = "default";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Rate table has no `default` entry")]
    MissingDefaultRate,

    #[error("Invalid rate for `{key}`: {rate}")]
    InvalidRate { key: String, rate: f64 },
}

/// Location key to rate per unit, with a mandatory default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct RateTable {
    default_rate: f64,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new(default_rate: f64) -> Self {
        Self {
            default_rate,
            rates: BTreeMap::new(),
        }
    }

    /// Add or replace a location rate; the key is lower-cased
    ///
    /// Using the key `default` replaces the fallback rate.
    pub fn with_rate(mut self, location: &str, rate: f64) -> Self {
        let key = location.to_lowercase();
        if key == DEFAULT_RATE_KEY {
            self.default_rate = rate;
        } else {
            self.rates.insert(key, rate);
        }
        self
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// Rate for a location, falling back to the default rate
    pub fn rate_per_unit(&self, location_key: &str) -> f64 {
        self.rates
            .get(&location_key.to_lowercase())
            .copied()
            .unwrap_or(self.default_rate)
    }

    /// Number of explicit location entries, excluding the default
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(DEFAULT_RATE_PER_UNIT)
    }
}

impl TryFrom<BTreeMap<String, f64>> for RateTable {
    type Error = ConfigError;

    fn try_from(entries: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        for (key, rate) in &entries {
            if !rate.is_finite() || *rate < 0.0 {
                return Err(ConfigError::InvalidRate {
                    key: key.clone(),
                    rate: *rate,
                });
            }
        }

        let mut rates: BTreeMap<String, f64> = entries
            .into_iter()
            .map(|(key, rate)| (key.to_lowercase(), rate))
            .collect();

        let default_rate = rates
            .remove(DEFAULT_RATE_KEY)
            .ok_or(ConfigError::MissingDefaultRate)?;

        Ok(Self {
            default_rate,
            rates,
        })
    }
}

impl From<RateTable> for BTreeMap<String, f64> {
    fn from(table: RateTable) -> Self {
        let mut entries = table.rates;
        entries.insert(DEFAULT_RATE_KEY.to_string(), table.default_rate);
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_market_rate")]
    pub current_rate_per_unit: f64,
}

fn default_market_rate() -> f64 {
    DEFAULT_MARKET_RATE_PER_UNIT
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            current_rate_per_unit: DEFAULT_MARKET_RATE_PER_UNIT,
        }
    }
}

/// Everything the assessment needs, injected rather than global
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub rates: RateTable,
    #[serde(default)]
    pub market: MarketConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        read_toml_file(path)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        parse_toml(s)
    }
}

/// Parse any TOML-backed configuration type
///
/// Shared by [`EngineConfig`] and by binaries that embed it in a larger file.
pub fn parse_toml<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(s)?)
}

/// Read and parse a TOML file into any configuration type
pub fn read_toml_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}
