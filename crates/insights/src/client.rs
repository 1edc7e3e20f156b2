//! HTTP client for the social-media insights service.
//!
//! One GET, no auth, no pagination, no retry.

use crate::normalizer::{normalize, NormalizedInsights};
use insights_core::config::InsightsServiceConfig;
use insights_core::{InsightsError, InsightsResult};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

pub struct InsightsClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl InsightsClient {
    pub fn new(config: &InsightsServiceConfig) -> InsightsResult<Self> {
        let endpoint = config.endpoint_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| InsightsError::Config(format!("failed to build HTTP client: {e}")))?;

        info!(endpoint = %endpoint, timeout_ms = config.timeout_ms, "Insights client initialized");
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the raw JSON payload.
    pub async fn fetch_raw(&self) -> InsightsResult<Value> {
        debug!(endpoint = %self.endpoint, "Fetching social media insights");

        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| {
                metrics::counter!("insights.fetch.errors", "kind" => "transport").increment(1);
                InsightsError::Fetch(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            metrics::counter!("insights.fetch.errors", "kind" => "status").increment(1);
            warn!(status = status.as_u16(), message = %message, "Insights service returned an error");
            return Err(InsightsError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            metrics::counter!("insights.fetch.errors", "kind" => "decode").increment(1);
            InsightsError::InvalidPayload(e.to_string())
        })
    }

    /// Fetch and normalize in one step.
    pub async fn fetch_products(&self) -> InsightsResult<NormalizedInsights> {
        let payload = self.fetch_raw().await?;
        normalize(payload)
    }
}

// The service reports failures as `{"error": "<message>"}`.
fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
