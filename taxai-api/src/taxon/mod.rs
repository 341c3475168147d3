//! Taxon metadata lookup
//!
//! Read-through client for the FinBIF (laji.fi) taxonomy API. The raw
//! payload is reshaped into a flat summary for display next to a prediction.

mod finbif_client;
mod models;
mod summary;

pub use finbif_client::FinbifClient;
pub use models::{
    Description, DescriptionGroup, DescriptionVariable, Habitat, TaxonDetails, TaxonSearchHit,
};
pub use summary::{description_html, summarize, translate_rank, TaxonSummary};

use async_trait::async_trait;
use std::time::Instant;
use taxai_common::Locale;
use thiserror::Error;

/// Taxon lookup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxonError {
    #[error("Taxon name contains invalid characters")]
    InvalidName,

    #[error("Taxon not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Taxonomy API refused access (403)")]
    Forbidden,

    #[error("Taxonomy API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of taxon metadata
#[async_trait]
pub trait TaxonSource: Send + Sync {
    /// Exact-name search; best match first
    async fn search(&self, name: &str) -> Result<Vec<TaxonSearchHit>, TaxonError>;

    /// Full record for a taxon id
    async fn details(&self, taxon_id: &str) -> Result<TaxonDetails, TaxonError>;
}

/// Check an untrusted taxon name and return it trimmed
///
/// Only ASCII letters, digits, `-` and space are allowed.
pub fn validate_taxon_name(untrusted: &str) -> Result<&str, TaxonError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == ' ';
    if untrusted.is_empty() || !untrusted.chars().all(allowed) {
        return Err(TaxonError::InvalidName);
    }

    let name = untrusted.trim();
    if name.is_empty() {
        return Err(TaxonError::InvalidName);
    }
    Ok(name)
}

/// Validate, search, fetch details and summarize
pub async fn lookup_taxon(
    source: &dyn TaxonSource,
    untrusted_name: &str,
    locale: Locale,
) -> Result<TaxonSummary, TaxonError> {
    let started = Instant::now();
    let name = validate_taxon_name(untrusted_name)?;

    let hits = source.search(name).await?;
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| TaxonError::NotFound(name.to_string()))?;

    let details = source.details(&hit.id).await?;

    tracing::info!(
        taxon = %name,
        taxon_id = %hit.id,
        "Taxon metadata retrieved"
    );

    Ok(summarize(name, &hit, &details, locale, started.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_plain_names() {
        assert_eq!(validate_taxon_name("Pyrrhocoris apterus"), Ok("Pyrrhocoris apterus"));
        assert_eq!(validate_taxon_name(" Sigara "), Ok("Sigara"));
        assert_eq!(validate_taxon_name("Aphis sp-2"), Ok("Aphis sp-2"));
    }

    #[test]
    fn test_validate_rejects_other_characters() {
        for name in ["", "   ", "Sigara;drop", "Pyrrhocoris/apterus", "Sigara\tstriata", "Täplä"] {
            assert!(validate_taxon_name(name).is_err(), "{:?}", name);
        }
    }
}
