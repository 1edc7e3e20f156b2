use crate::error::{InsightsError, InsightsResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Root application configuration. Loaded from environment variables
/// with the prefix `INSIGHTS_DASHBOARD__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub insights: InsightsServiceConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Where the social-media insights service lives.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsServiceConfig {
    #[serde(default = "default_insights_base_url")]
    pub base_url: String,
    #[serde(default = "default_insights_path")]
    pub path: String,
    #[serde(default = "default_insights_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Artificial delay before generated content becomes visible.
    #[serde(default = "default_generation_delay_ms")]
    pub delay_ms: u64,
}

// Default functions
fn default_node_id() -> String {
    "dashboard-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    false
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_insights_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
// The service really does spell its route this way.
fn default_insights_path() -> String {
    "/get-scoialmediainsights".to_string()
}
fn default_insights_timeout_ms() -> u64 {
    10_000
}
fn default_generation_delay_ms() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for InsightsServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_insights_base_url(),
            path: default_insights_path(),
            timeout_ms: default_insights_timeout_ms(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_generation_delay_ms(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            insights: InsightsServiceConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

impl InsightsServiceConfig {
    /// Full URL of the insights endpoint.
    pub fn endpoint_url(&self) -> InsightsResult<Url> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| InsightsError::Config(format!("invalid insights base_url: {e}")))?;
        base.join(&self.path)
            .map_err(|e| InsightsError::Config(format!("invalid insights path: {e}")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl GenerationConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from environment variables, layered over an
    /// optional config file.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("INSIGHTS_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_insights_service() {
        let config = AppConfig::default();
        let url = config.insights.endpoint_url().unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/get-scoialmediainsights");
        assert_eq!(config.generation.delay(), Duration::from_millis(500));
        assert_eq!(config.api.http_port, 8080);
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_endpoint_url_rejects_garbage_base() {
        let insights = InsightsServiceConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let err = insights.endpoint_url().unwrap_err();
        assert!(matches!(err, InsightsError::Config(_)));
    }

    #[test]
    fn test_empty_sources_deserialize_to_defaults() {
        let config: AppConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.node_id, "dashboard-01");
        assert_eq!(config.insights.timeout_ms, 10_000);
    }
}
