//! API server: REST endpoints, Swagger UI, and the metrics exporter.

use crate::customer_rest;
use crate::dashboard_rest;
use crate::insights_rest;
use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use axum::routing::{delete, get, post};
use axum::Router;
use insights_core::config::AppConfig;
use std::net::{IpAddr, SocketAddr};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub struct ApiServer {
    config: AppConfig,
    host: IpAddr,
    state: AppState,
}

/// Build the full HTTP router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route(
            "/v1/dashboard/pain-points",
            get(dashboard_rest::handle_pain_points),
        )
        // Customer insights
        .route("/v1/customers", get(customer_rest::handle_list_customers))
        .route("/v1/customers/:id", get(customer_rest::handle_get_customer))
        .route(
            "/v1/customers/:id/content/:channel",
            post(customer_rest::handle_generate_content),
        )
        .route(
            "/v1/customers/:id/expanded/:kind",
            get(customer_rest::handle_expand),
        )
        .route(
            "/v1/sessions/:session/dialog",
            get(customer_rest::handle_get_dialog).delete(customer_rest::handle_close_dialog),
        )
        .route(
            "/v1/sessions/:session/generation",
            delete(customer_rest::handle_cancel_generation),
        )
        // Social media analysis
        .route("/v1/insights", get(insights_rest::handle_get_insights))
        .route(
            "/v1/insights/:product_id/ads/:channel",
            get(insights_rest::handle_get_ad),
        )
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl ApiServer {
    /// Fails when the configured host is not an IP address.
    pub fn new(config: AppConfig, state: AppState) -> anyhow::Result<Self> {
        let host = config.api.host.parse::<IpAddr>()?;
        Ok(Self {
            config,
            host,
            state,
        })
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = router(self.state.clone());

        let addr = SocketAddr::new(self.host, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port, if enabled.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        if !self.config.metrics.enabled {
            info!("Metrics exporter disabled");
            return Ok(());
        }

        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(self.host, self.config.metrics.port))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_is_parsed_once_up_front() {
        let config = AppConfig::default();
        let state = AppState::new(&config).unwrap();
        let server = ApiServer::new(config.clone(), state.clone()).unwrap();
        assert_eq!(server.host.to_string(), "0.0.0.0");

        let mut bad = config;
        bad.api.host = "not-an-ip".to_string();
        assert!(ApiServer::new(bad, state).is_err());
    }
}
