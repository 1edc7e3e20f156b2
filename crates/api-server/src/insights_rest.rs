//! Social media analysis REST endpoints.
//!
//! Every request fetches the insights service afresh; nothing is cached.

use crate::rest::{api_error, upstream_failure, AppState, ErrorResponse};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use insights_channels::AdCreative;
use insights_core::AdChannel;
use insights_feed::{InsightsPageState, InsightsPageView};
use tracing::info;

/// GET /v1/insights: Load the analysis page.
///
/// A failed fetch still answers with the page view (status `failed` and the
/// error text) but under 502.
#[utoipa::path(
    get,
    path = "/v1/insights",
    tag = "Insights",
    responses(
        (status = 200, description = "Loaded page", body = InsightsPageView),
        (status = 502, description = "Insights service failed", body = InsightsPageView),
    )
)]
pub async fn handle_get_insights(
    State(state): State<AppState>,
) -> (StatusCode, Json<InsightsPageView>) {
    let page = InsightsPageState::load(&state.insights).await;
    let status = match &page {
        InsightsPageState::Failed { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(InsightsPageView::from(&page)))
}

/// GET /v1/insights/{product_id}/ads/{channel}: Ad preview for a product.
#[utoipa::path(
    get,
    path = "/v1/insights/{product_id}/ads/{channel}",
    tag = "Insights",
    params(
        ("product_id" = String, Path, description = "Product identifier"),
        ("channel" = AdChannel, Path, description = "meta, instagram, or linkedin"),
    ),
    responses(
        (status = 200, description = "Ad creative", body = AdCreative),
        (status = 404, description = "Unknown product", body = ErrorResponse),
        (status = 502, description = "Insights service failed", body = ErrorResponse),
    )
)]
pub async fn handle_get_ad(
    State(state): State<AppState>,
    Path((product_id, channel)): Path<(String, AdChannel)>,
) -> Result<Json<AdCreative>, (StatusCode, Json<ErrorResponse>)> {
    let mut page = InsightsPageState::load(&state.insights).await;
    if let InsightsPageState::Failed { message } = &page {
        return Err(upstream_failure(message));
    }

    let creative = page.open_ad(&product_id, channel).map_err(api_error)?;
    info!(
        product_id = %product_id,
        channel = channel.as_str(),
        source = ?creative.source,
        "Ad preview opened"
    );
    Ok(Json(creative.clone()))
}
