//! taxai-api library - species identification HTTP service
//!
//! Exposes the router and adapters for integration testing

pub mod api;
pub mod background;
pub mod classifier;
pub mod config;
pub mod error;
pub mod image;
pub mod logging;
pub mod taxon;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use background::{BackgroundProvider, NoBackground};
use chrono::{DateTime, Utc};
use classifier::Classifier;
use std::sync::Arc;
use taxai_common::{Locale, PredictionEngine};
use taxon::TaxonSource;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
///
/// Every dependency is constructed once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Image → probability distribution adapter
    pub classifier: Arc<dyn Classifier>,
    /// Ranking and aggregation engine
    pub engine: Arc<PredictionEngine>,
    /// Taxonomy metadata API
    pub taxon_source: Arc<dyn TaxonSource>,
    /// Auxiliary context lookup for `(species, region, date)`
    pub background: Arc<dyn BackgroundProvider>,
    /// Display language for taxon summaries
    pub locale: Locale,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        engine: PredictionEngine,
        taxon_source: Arc<dyn TaxonSource>,
    ) -> Self {
        let locale = engine.locale();
        Self {
            classifier,
            engine: Arc::new(engine),
            taxon_source,
            background: Arc::new(NoBackground),
            locale,
            startup_time: Utc::now(),
        }
    }

    /// Replace the default (empty) background provider
    pub fn with_background(mut self, background: Arc<dyn BackgroundProvider>) -> Self {
        self.background = background;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::predict_routes())
        .merge(api::taxon_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Browser frontends are served from a different origin
        .layer(CorsLayer::permissive())
}
