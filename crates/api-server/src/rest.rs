//! Shared REST state, error mapping, and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dashmap::DashMap;
use insights_channels::{ContentGenerator, CustomerInsightsPage};
use insights_core::{
    AppConfig, CustomerDirectory, InsightsError, InsightsResult, PainPointAnalysis,
};
use insights_feed::InsightsClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};
use utoipa::{IntoParams, ToSchema};

/// Session used when the caller does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// Maximum accepted session name length.
const MAX_SESSION_LEN: usize = 64;

/// Maximum number of live dashboard sessions.
pub const MAX_SESSIONS: usize = 1024;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub node_id: String,
    pub start_time: Instant,
    pub directory: Arc<CustomerDirectory>,
    pub pain_points: Arc<PainPointAnalysis>,
    pub generator: Arc<ContentGenerator>,
    pub insights: Arc<InsightsClient>,
    /// Customer insights page per dashboard session.
    pub pages: Arc<DashMap<String, Arc<CustomerInsightsPage>>>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> InsightsResult<Self> {
        Ok(Self {
            node_id: config.node_id.clone(),
            start_time: Instant::now(),
            directory: Arc::new(CustomerDirectory::mock()),
            pain_points: Arc::new(PainPointAnalysis::company_a()),
            generator: Arc::new(ContentGenerator::new(&config.generation)),
            insights: Arc::new(InsightsClient::new(&config.insights)?),
            pages: Arc::new(DashMap::new()),
        })
    }

    /// The page for `session`, created on first use. Idle sessions are
    /// evicted when the map is full; if it is still full the call fails.
    pub fn page(&self, session: &str) -> InsightsResult<Arc<CustomerInsightsPage>> {
        if !self.pages.contains_key(session) && self.pages.len() >= MAX_SESSIONS {
            self.pages.retain(|_, page| !page.is_idle());
            if self.pages.len() >= MAX_SESSIONS {
                return Err(InsightsError::SessionLimit(self.pages.len()));
            }
        }

        Ok(self
            .pages
            .entry(session.to_string())
            .or_insert_with(|| {
                debug!(session, "Opening dashboard session");
                Arc::new(CustomerInsightsPage::new(
                    self.directory.clone(),
                    self.generator.clone(),
                ))
            })
            .clone())
    }

    /// The page for `session` if it was ever used.
    pub fn existing_page(&self, session: &str) -> Option<Arc<CustomerInsightsPage>> {
        self.pages.get(session).map(|page| page.clone())
    }

    /// Drop `session` if nothing is running and no dialog is showing.
    pub fn evict_if_idle(&self, session: &str) -> bool {
        let evicted = self
            .pages
            .remove_if(session, |_, page| page.is_idle())
            .is_some();
        if evicted {
            debug!(session, "Closed idle dashboard session");
        }
        evicted
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// Dashboard session name. Defaults to `default`.
    pub session: Option<String>,
}

impl SessionQuery {
    pub fn name(&self) -> Result<&str, (StatusCode, Json<ErrorResponse>)> {
        let name = self.session.as_deref().unwrap_or(DEFAULT_SESSION);
        validate_session(name)?;
        Ok(name)
    }
}

pub fn validate_session(name: &str) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if name.is_empty() || name.len() > MAX_SESSION_LEN {
        warn!(len = name.len(), "Rejected session name");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid_session".to_string(),
                message: format!("session name must be 1 to {MAX_SESSION_LEN} bytes"),
            }),
        ));
    }
    Ok(())
}

/// Map a domain error onto an HTTP status and error body.
pub fn api_error(e: InsightsError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &e {
        InsightsError::CustomerNotFound(_) | InsightsError::ProductNotFound(_) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        InsightsError::GenerationSuperseded => (StatusCode::CONFLICT, "superseded"),
        InsightsError::GenerationCancelled => (StatusCode::CONFLICT, "cancelled"),
        InsightsError::SessionLimit(_) => (StatusCode::SERVICE_UNAVAILABLE, "session_limit"),
        e if e.is_upstream() => (StatusCode::BAD_GATEWAY, "upstream_error"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    if status.is_server_error() {
        error!(error = %e, "Request failed");
        metrics::counter!("api.errors").increment(1);
    }

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: e.to_string(),
        }),
    )
}

/// 502 for an insights page that failed to load. The page message is
/// already the full error text, so it is passed through unchanged.
pub fn upstream_failure(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    metrics::counter!("api.errors").increment(1);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: "upstream_error".to_string(),
            message: message.to_string(),
        }),
    )
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        sessions: state.pages.len(),
    })
}

/// GET /ready: Readiness check.
///
/// The insights service is not contacted; its failures surface per request
/// as 502.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses((status = 200, description = "Ready to serve"))
)]
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live: Liveness check.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
    pub sessions: usize,
}
