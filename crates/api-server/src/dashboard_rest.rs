//! Dashboard landing page endpoints.

use crate::rest::AppState;
use axum::extract::State;
use axum::Json;
use insights_core::PainPointAnalysis;

/// GET /v1/dashboard/pain-points: Company pain point analysis.
#[utoipa::path(
    get,
    path = "/v1/dashboard/pain-points",
    tag = "Dashboard",
    responses((status = 200, description = "Pain point analysis", body = PainPointAnalysis))
)]
pub async fn handle_pain_points(State(state): State<AppState>) -> Json<PainPointAnalysis> {
    Json(state.pain_points.as_ref().clone())
}
