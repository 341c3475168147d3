//! HTTP inference backend client
//!
//! Sends the raw image bytes to a model server (TorchServe-style
//! `POST /predictions/<model>`) and turns its JSON answer into a
//! probability distribution.

use super::{Classifier, ClassifierError, LabelMap};
use crate::image::ImagePayload;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use taxai_common::ProbabilityDistribution;

const USER_AGENT: &str = concat!("taxai-api/", env!("CARGO_PKG_VERSION"));

/// Inference server client
pub struct RemoteClassifier {
    http_client: reqwest::Client,
    endpoint: String,
    label_map: Option<LabelMap>,
}

impl RemoteClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        label_map: Option<LabelMap>,
    ) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            label_map,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(
        &self,
        image: &ImagePayload,
    ) -> Result<ProbabilityDistribution, ClassifierError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            bytes = image.len(),
            mime = image.mime_type(),
            "Querying inference backend"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, image.mime_type())
            .body(image.bytes().to_vec())
            .send()
            .await
            .map_err(|e| ClassifierError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassifierError::ApiError(status.as_u16(), error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::ParseError(e.to_string()))?;

        let distribution = parse_backend_response(body, self.label_map.as_ref())?;
        tracing::debug!(
            classes = distribution.len(),
            total = distribution.total(),
            "Inference backend answered"
        );
        Ok(distribution)
    }
}

/// Convert an inference backend answer into a distribution
///
/// Accepted shapes:
/// - `{"label": probability, ...}`
/// - `{"probabilities": {"label": probability, ...}, ...}`
/// - `[probability, ...]`, resolved through the label map
pub fn parse_backend_response(
    body: Value,
    label_map: Option<&LabelMap>,
) -> Result<ProbabilityDistribution, ClassifierError> {
    match body {
        Value::Object(mut fields) => {
            if let Some(Value::Object(probabilities)) = fields.remove("probabilities") {
                fields = probabilities;
            }
            fields
                .into_iter()
                .map(|(label, value)| Ok::<_, ClassifierError>((label, probability(&value)?)))
                .collect()
        }
        Value::Array(values) => {
            let label_map = label_map.ok_or_else(|| {
                ClassifierError::ParseError(
                    "Backend returned a probability vector but no label map is configured"
                        .to_string(),
                )
            })?;
            if values.len() != label_map.len() {
                return Err(ClassifierError::ParseError(format!(
                    "Backend returned {} probabilities for {} labels",
                    values.len(),
                    label_map.len()
                )));
            }
            values
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    let label = label_map.label(index).ok_or_else(|| {
                        ClassifierError::ParseError(format!("No label for index {}", index))
                    })?;
                    Ok::<_, ClassifierError>((label.to_string(), probability(value)?))
                })
                .collect()
        }
        other => Err(ClassifierError::ParseError(format!(
            "Unexpected backend response: {}",
            other
        ))),
    }
}

fn probability(value: &Value) -> Result<f64, ClassifierError> {
    let p = value
        .as_f64()
        .ok_or_else(|| ClassifierError::ParseError(format!("Not a probability: {}", value)))?;
    if !(0.0..=1.0).contains(&p) {
        return Err(ClassifierError::ParseError(format!(
            "Probability out of range: {}",
            p
        )));
    }
    Ok(p)
}
