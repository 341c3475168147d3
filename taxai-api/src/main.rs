//! taxai-api - Species identification microservice
//!
//! Accepts an image, asks the inference backend for class probabilities and
//! answers with a ranked species/genus report. Also serves taxon metadata
//! from the FinBIF API.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use taxai_api::classifier::{LabelMap, RemoteClassifier};
use taxai_api::config::{resolve_settings, Cli};
use taxai_api::logging;
use taxai_api::taxon::FinbifClient;
use taxai_api::{build_router, AppState};
use taxai_common::config::resolve_config_path;
use taxai_common::PredictionEngine;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing first so config loading can report a missing file
    let log_level = logging::init();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = resolve_settings(&cli, config_path.as_deref())?;
    if log_level.apply_configured_level(&config.logging.level)? {
        info!("Log level: {}", config.logging.level);
    }

    info!(
        "Starting TaxAI species identification (taxai-api) v{}",
        env!("CARGO_PKG_VERSION")
    );
    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults"),
    }

    let label_map = match &config.classifier.label_map {
        Some(path) => {
            let map = LabelMap::load(path)?;
            info!("Loaded label map with {} classes from {}", map.len(), path.display());
            Some(map)
        }
        None => None,
    };

    let classifier = RemoteClassifier::new(
        config.classifier.endpoint.clone(),
        Duration::from_secs(config.classifier.timeout_secs),
        label_map,
    )?;
    info!("Inference backend: {}", classifier.endpoint());

    let taxon_source = FinbifClient::new(
        config.taxon_lookup.base_url.clone(),
        config.taxon_lookup.access_token.clone(),
        Duration::from_secs(config.taxon_lookup.timeout_secs),
    )?;
    if !taxon_source.has_access_token() {
        warn!("FinBIF access token not configured; taxon lookups will likely be refused");
    }

    let engine = PredictionEngine::new(config.advisory_table(), config.locale);
    info!(
        "Locale: {}, {} advisory rule(s)",
        engine.locale(),
        engine.advisories().rules().len()
    );

    let state = AppState::new(Arc::new(classifier), engine, Arc::new(taxon_source));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("taxai-api listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
