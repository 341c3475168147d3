//! Command-line and environment configuration for taxai-api
//!
//! **Priority:** command line → environment → TOML → compiled defaults
//!
//! clap reads each flag from its environment variable when the flag is not
//! given, so both upper layers arrive here as one `Cli` value and are laid
//! over the TOML config.

use clap::Parser;
use std::path::{Path, PathBuf};
use taxai_common::config::{load_or_default, TomlConfig};
use taxai_common::{Locale, Result};

/// Species identification HTTP service
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "taxai-api", version, about)]
pub struct Cli {
    /// TOML config file
    #[arg(long, env = "TAXAI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (host:port)
    #[arg(long, env = "TAXAI_BIND")]
    pub bind: Option<String>,

    /// Language for confidence texts and notes (en, fi)
    #[arg(long, env = "TAXAI_LOCALE")]
    pub locale: Option<Locale>,

    /// Inference backend URL
    #[arg(long, env = "TAXAI_CLASSIFIER_URL")]
    pub classifier_url: Option<String>,

    /// `{label: index}` JSON file for backends returning probability vectors
    #[arg(long, env = "TAXAI_LABEL_MAP")]
    pub label_map: Option<PathBuf>,

    /// FinBIF API access token
    #[arg(long, env = "TAXAI_FINBIF_TOKEN", hide_env_values = true)]
    pub finbif_token: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "TAXAI_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Lay command-line/environment values over a loaded config
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(bind) = &self.bind {
            config.bind_address = bind.clone();
        }
        if let Some(locale) = self.locale {
            // Built-in advisory text follows the locale unless the file supplies its own
            config.locale = locale;
        }
        if let Some(url) = &self.classifier_url {
            config.classifier.endpoint = url.clone();
        }
        if let Some(path) = &self.label_map {
            config.classifier.label_map = Some(path.clone());
        }
        if let Some(token) = &self.finbif_token {
            config.taxon_lookup.access_token = Some(token.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Load the TOML file (if any) and apply command-line/environment overrides
pub fn resolve_settings(cli: &Cli, config_path: Option<&Path>) -> Result<TomlConfig> {
    let mut config = load_or_default(config_path)?;
    cli.apply_overrides(&mut config);
    Ok(config)
}
