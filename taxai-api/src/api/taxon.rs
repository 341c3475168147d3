//! Taxon metadata endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::taxon::{lookup_taxon, TaxonError, TaxonSummary};
use crate::{ApiResult, AppState};

/// GET /taxon/:name
pub async fn get_taxon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<TaxonSummary>> {
    let summary = lookup_taxon(state.taxon_source.as_ref(), &name, state.locale)
        .await
        .map_err(|e| {
            match &e {
                TaxonError::InvalidName | TaxonError::NotFound(_) => {
                    tracing::debug!(error = %e, "Taxon lookup rejected")
                }
                _ => tracing::warn!(error = %e, "Taxon lookup failed"),
            }
            e
        })?;

    Ok(Json(summary))
}

/// Build taxon routes
pub fn taxon_routes() -> Router<AppState> {
    Router::new().route("/taxon/:name", get(get_taxon))
}
