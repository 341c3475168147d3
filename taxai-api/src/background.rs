//! Auxiliary context for a prediction
//!
//! When a request carries both `region` and `date`, a provider may attach
//! extra data about the predicted species (e.g. local observation history).

use async_trait::async_trait;
use serde_json::Value;

/// Lookup keyed by `(best_species, region, date)`
#[async_trait]
pub trait BackgroundProvider: Send + Sync {
    /// `Ok(None)` when the provider has nothing for this key
    async fn background(
        &self,
        species: &str,
        region: &str,
        date: &str,
    ) -> anyhow::Result<Option<Value>>;
}

/// Provider that never returns data
pub struct NoBackground;

#[async_trait]
impl BackgroundProvider for NoBackground {
    async fn background(
        &self,
        _species: &str,
        _region: &str,
        _date: &str,
    ) -> anyhow::Result<Option<Value>> {
        Ok(None)
    }
}
