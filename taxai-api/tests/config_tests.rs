//! Tests for command-line/environment configuration
//!
//! Uses serial_test so tests setting TAXAI_* variables do not race.

use clap::Parser;
use serial_test::serial;
use std::env;
use std::io::Write;
use taxai_api::config::{resolve_settings, Cli};
use taxai_common::config::DEFAULT_BIND_ADDRESS;
use taxai_common::Locale;

const TAXAI_VARS: [&str; 7] = [
    "TAXAI_CONFIG",
    "TAXAI_BIND",
    "TAXAI_LOCALE",
    "TAXAI_CLASSIFIER_URL",
    "TAXAI_LABEL_MAP",
    "TAXAI_FINBIF_TOKEN",
    "TAXAI_LOG_LEVEL",
];

fn clear_env() {
    for var in TAXAI_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_flags_or_file() {
    clear_env();
    let cli = Cli::try_parse_from(["taxai-api"]).expect("parse");
    let config = resolve_settings(&cli, None).expect("defaults");

    assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
    assert_eq!(config.locale, Locale::En);
}

#[test]
#[serial]
fn test_flags_override_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(
        br#"
bind_address = "127.0.0.1:7000"
locale = "fi"

[classifier]
endpoint = "http://from-file/predictions/species"
"#,
    )
    .expect("write config");

    let cli = Cli::try_parse_from([
        "taxai-api",
        "--bind",
        "127.0.0.1:9000",
        "--classifier-url",
        "http://from-flag/predictions/species",
    ])
    .expect("parse");
    let config = resolve_settings(&cli, Some(file.path())).expect("valid config");

    assert_eq!(config.bind_address, "127.0.0.1:9000");
    assert_eq!(config.classifier.endpoint, "http://from-flag/predictions/species");
    // Not overridden: file value stays
    assert_eq!(config.locale, Locale::Fi);
}

#[test]
#[serial]
fn test_environment_used_when_flag_absent() {
    clear_env();
    env::set_var("TAXAI_LOCALE", "fi");
    env::set_var("TAXAI_FINBIF_TOKEN", "env-token");

    let cli = Cli::try_parse_from(["taxai-api"]).expect("parse");
    let config = resolve_settings(&cli, None).expect("defaults");
    clear_env();

    assert_eq!(config.locale, Locale::Fi);
    assert_eq!(config.taxon_lookup.access_token.as_deref(), Some("env-token"));
    assert_eq!(
        config.advisory_table().note_for("Sigara"),
        taxai_common::AdvisoryTable::builtin(Locale::Fi).note_for("Sigara")
    );
}

#[test]
#[serial]
fn test_flag_beats_environment() {
    clear_env();
    env::set_var("TAXAI_BIND", "0.0.0.0:1111");

    let cli = Cli::try_parse_from(["taxai-api", "--bind", "0.0.0.0:2222"]).expect("parse");
    clear_env();

    assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:2222"));
}

#[test]
#[serial]
fn test_invalid_locale_rejected() {
    clear_env();
    assert!(Cli::try_parse_from(["taxai-api", "--locale", "sv"]).is_err());
}
