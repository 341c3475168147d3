//! Image prediction endpoint

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taxai_common::PredictionReport;
use tracing::{info, warn};

use crate::image::ImagePayload;
use crate::{ApiError, ApiResult, AppState};

/// Maximum request body (base64 inflates images by a third)
pub const MAX_REQUEST_BYTES: usize = 20 * 1024 * 1024;

/// POST /predict request body
#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    /// Base64 image, optionally as a `data:` URL
    pub image: Option<String>,
    pub region: Option<String>,
    pub date: Option<String>,
}

/// Request parameters echoed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestParameters {
    pub region: String,
    pub date: String,
}

impl PredictRequest {
    /// Both `region` and `date`, if present and non-blank
    fn parameters(&self) -> Option<RequestParameters> {
        let region = self.region.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let date = self.date.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some(RequestParameters {
            region: region.to_string(),
            date: date.to_string(),
        })
    }
}

/// POST /predict response body
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: PredictionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<RequestParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Value>,
}

/// POST /predict
///
/// Decodes the image, runs the classifier and ranks its output.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let encoded = request
        .image
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("No image data provided".to_string()))?;
    let image = ImagePayload::from_base64(encoded)?;

    let distribution = state.classifier.classify(&image).await.map_err(|e| {
        warn!(error = %e, "Classifier call failed");
        ApiError::from(e)
    })?;

    let prediction = state.engine.evaluate(&distribution)?;

    info!(
        best_species = %prediction.best_species.taxon,
        species_confidence = prediction.best_species.confidence,
        best_genus = %prediction.best_genus.taxon,
        genus_confidence = prediction.best_genus.confidence,
        "Prediction complete"
    );

    let parameters = request.parameters();
    let background = match &parameters {
        Some(params) => {
            match state
                .background
                .background(&prediction.best_species.taxon, &params.region, &params.date)
                .await
            {
                Ok(background) => background,
                Err(e) => {
                    warn!(error = %e, "Background lookup failed, omitting");
                    None
                }
            }
        }
        None => None,
    };

    Ok(Json(PredictResponse {
        prediction,
        parameters,
        background,
    }))
}

/// Build prediction routes
pub fn predict_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_require_region_and_date() {
        let request = PredictRequest {
            image: None,
            region: Some("Uusimaa".to_string()),
            date: Some(" 2025-06-01 ".to_string()),
        };
        assert_eq!(
            request.parameters(),
            Some(RequestParameters {
                region: "Uusimaa".to_string(),
                date: "2025-06-01".to_string(),
            })
        );

        let request = PredictRequest {
            region: Some("Uusimaa".to_string()),
            ..Default::default()
        };
        assert_eq!(request.parameters(), None);

        let request = PredictRequest {
            region: Some("  ".to_string()),
            date: Some("2025-06-01".to_string()),
            ..Default::default()
        };
        assert_eq!(request.parameters(), None);
    }
}
