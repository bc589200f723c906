//! `landcomp.toml` loading
//!
//! Every section is optional. The rate and market sections feed the
//! compensation engine; `store` and `ocr` are only used by the binary.

use compensation_engine::{parse_toml, read_toml_file, ConfigError, EngineConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "landcomp.toml";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:compensation.db?mode=rwc";
pub const DEFAULT_TESSERACT_PATH: &str = "tesseract";
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tesseract_path() -> PathBuf {
    PathBuf::from(DEFAULT_TESSERACT_PATH)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_OCR_TIMEOUT_SECS
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
            timeout_secs: DEFAULT_OCR_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// `[rates]` and `[market]`
    #[serde(flatten)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        parse_toml(s)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        read_toml_file(path)
    }

    /// Load an explicit file, else `landcomp.toml` if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// `DATABASE_URL` wins over the file
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
            self.store.database_url = url;
        }
        self
    }
}
