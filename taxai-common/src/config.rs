//! Configuration loading and config file resolution
//!
//! The TOML file is the lowest-priority override layer above compiled
//! defaults. Command-line flags and environment variables are applied on top
//! of it by the service binary.

use crate::prediction::{AdvisoryRule, AdvisoryTable, Locale};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default inference server endpoint (TorchServe-style prediction route)
pub const DEFAULT_CLASSIFIER_ENDPOINT: &str = "http://127.0.0.1:8081/predictions/species";

/// Default FinBIF (laji.fi) API base URL
pub const DEFAULT_TAXON_API_BASE_URL: &str = "https://api.laji.fi/v0";

/// Default timeout for outbound HTTP calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is not set (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Inference backend section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// URL receiving the raw image bytes via POST
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Optional `{label: index}` JSON file for backends returning a bare probability vector
    pub label_map: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLASSIFIER_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            label_map: None,
        }
    }
}

/// Taxonomy metadata API section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonLookupConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TaxonLookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TAXON_API_BASE_URL.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// TOML configuration file model
///
/// Every field is optional in the file; missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub bind_address: String,
    pub locale: Locale,
    pub logging: LoggingConfig,
    pub classifier: ClassifierConfig,
    pub taxon_lookup: TaxonLookupConfig,
    /// Replaces the built-in advisory table when present
    pub advisories: Option<Vec<AdvisoryRule>>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            locale: Locale::default(),
            logging: LoggingConfig::default(),
            classifier: ClassifierConfig::default(),
            taxon_lookup: TaxonLookupConfig::default(),
            advisories: None,
        }
    }
}

impl TomlConfig {
    /// Advisory table from the `[[advisories]]` entries, or the built-in one for the locale
    pub fn advisory_table(&self) -> AdvisoryTable {
        match &self.advisories {
            Some(rules) => AdvisoryTable::new(rules.clone()),
            None => AdvisoryTable::builtin(self.locale),
        }
    }
}

/// Platform config file location: `<config_dir>/taxai/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taxai").join("config.toml"))
}

/// Resolve which config file to read
///
/// Priority order:
/// 1. Explicit path (command line or `TAXAI_CONFIG`)
/// 2. Platform default location, if it exists
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    default_config_path().filter(|p| p.exists())
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load config with graceful degradation
///
/// A missing file logs a warning and yields defaults. A file that exists but
/// cannot be parsed is an error.
pub fn load_or_default(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        info!("No config file found, using compiled defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let config = load_toml_config(path)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
