//! FinBIF (api.laji.fi) client

use super::{TaxonDetails, TaxonError, TaxonSearchHit, TaxonSource};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("taxai-api/", env!("CARGO_PKG_VERSION"));

/// FinBIF taxonomy API client
pub struct FinbifClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl FinbifClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TaxonError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TaxonError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// GET `{base_url}/{path}` with query parameters plus the access token
    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, TaxonError> {
        let url = format!("{}/{}", self.base_url, path);

        let token = match &self.access_token {
            Some(token) => token.as_str(),
            None => {
                tracing::warn!(url = %url, "FinBIF access token is not configured");
                ""
            }
        };

        tracing::debug!(url = %url, "Querying FinBIF API");

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("access_token", token)])
            .send()
            .await
            .map_err(|e| TaxonError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(TaxonError::Forbidden);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TaxonError::ApiError(status.as_u16(), error_text));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TaxonError::ParseError(e.to_string()))?;

        check_body_status(&body)?;
        Ok(body)
    }
}

/// The API can report errors in the body with a 200 response
fn check_body_status(body: &Value) -> Result<(), TaxonError> {
    match body.get("status").and_then(Value::as_u64) {
        Some(403) => Err(TaxonError::Forbidden),
        Some(code) if code >= 400 => Err(TaxonError::ApiError(
            code as u16,
            body.get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        )),
        _ => Ok(()),
    }
}

/// Search results arrive as a bare array or wrapped in `results`
fn parse_search_hits(body: Value) -> Result<Vec<TaxonSearchHit>, TaxonError> {
    let hits = match body {
        Value::Array(hits) => Value::Array(hits),
        Value::Object(mut fields) => fields.remove("results").unwrap_or(Value::Array(Vec::new())),
        other => {
            return Err(TaxonError::ParseError(format!(
                "Unexpected search response: {}",
                other
            )))
        }
    };
    serde_json::from_value(hits).map_err(|e| TaxonError::ParseError(e.to_string()))
}

#[async_trait]
impl TaxonSource for FinbifClient {
    async fn search(&self, name: &str) -> Result<Vec<TaxonSearchHit>, TaxonError> {
        let body = self
            .get_json(
                "taxa/search",
                &[
                    ("query", name),
                    ("limit", "10"),
                    ("matchType", "exact"),
                    ("onlySpecies", "false"),
                    ("onlyFinnish", "false"),
                    ("onlyInvasive", "false"),
                    ("observationMode", "false"),
                ],
            )
            .await?;
        parse_search_hits(body)
    }

    async fn details(&self, taxon_id: &str) -> Result<TaxonDetails, TaxonError> {
        let body = self
            .get_json(
                &format!("taxa/{}", taxon_id),
                &[
                    ("langFallback", "true"),
                    ("maxLevel", "0"),
                    ("includeHidden", "false"),
                    ("includeMedia", "true"),
                    ("includeDescriptions", "true"),
                    ("includeRedListEvaluations", "true"),
                    ("sortOrder", "taxonomic"),
                    ("lang", "fi"),
                ],
            )
            .await?;
        serde_json::from_value(body).map_err(|e| TaxonError::ParseError(e.to_string()))
    }
}
