//! Classifier adapter
//!
//! The classifier is an external collaborator: given an image it returns a
//! probability for every known class. It is constructed once at startup and
//! shared read-only by all requests.

mod label_map;
mod remote;

pub use label_map::LabelMap;
pub use remote::{parse_backend_response, RemoteClassifier};

use crate::image::ImagePayload;
use async_trait::async_trait;
use taxai_common::ProbabilityDistribution;
use thiserror::Error;

/// Classifier adapter errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Inference backend error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Label map error: {0}")]
    LabelMap(String),
}

/// Image → class probability distribution
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier reported by the health endpoint
    fn name(&self) -> &str;

    /// Probability for every class known to the model
    async fn classify(&self, image: &ImagePayload)
        -> Result<ProbabilityDistribution, ClassifierError>;
}
