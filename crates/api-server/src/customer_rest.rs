//! Customer insights REST endpoints: table, content generation, dialogs.

use crate::rest::{api_error, validate_session, AppState, ErrorResponse, SessionQuery};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use insights_channels::{CustomerDialog, ExpandedKind, GeneratedContent};
use insights_core::{ContentChannel, Customer, CustomerStatus};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// One row of the customer table.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerRow {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: CustomerStatus,
    pub last_purchase: String,
    pub total_spent: String,
    pub insight_preview: String,
    pub recommendation_preview: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            company: customer.company.clone(),
            status: customer.status,
            last_purchase: customer.last_purchase.clone(),
            total_spent: customer.total_spent_display(),
            insight_preview: customer.insight_preview(),
            recommendation_preview: customer.recommendation_preview(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/// GET /v1/customers: Customer table.
#[utoipa::path(
    get,
    path = "/v1/customers",
    tag = "Customers",
    responses((status = 200, description = "All customers", body = Vec<CustomerRow>))
)]
pub async fn handle_list_customers(State(state): State<AppState>) -> Json<Vec<CustomerRow>> {
    Json(state.directory.all().iter().map(CustomerRow::from).collect())
}

/// GET /v1/customers/{id}: One customer with full insight text.
#[utoipa::path(
    get,
    path = "/v1/customers/{id}",
    tag = "Customers",
    params(("id" = u32, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer record", body = Customer),
        (status = 404, description = "Unknown customer", body = ErrorResponse),
    )
)]
pub async fn handle_get_customer(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Customer> {
    state
        .directory
        .get(id)
        .map(|customer| Json(customer.clone()))
        .map_err(api_error)
}

/// POST /v1/customers/{id}/content/{channel}: Generate outreach content.
///
/// Waits out the generation delay. A newer request in the same session
/// supersedes this one, which then answers 409.
#[utoipa::path(
    post,
    path = "/v1/customers/{id}/content/{channel}",
    tag = "Customers",
    params(
        ("id" = u32, Path, description = "Customer identifier"),
        ("channel" = ContentChannel, Path, description = "email, push-notification, or sms"),
        SessionQuery,
    ),
    responses(
        (status = 200, description = "Generated content", body = GeneratedContent),
        (status = 404, description = "Unknown customer", body = ErrorResponse),
        (status = 409, description = "Superseded or cancelled", body = ErrorResponse),
    )
)]
pub async fn handle_generate_content(
    State(state): State<AppState>,
    Path((id, channel)): Path<(u32, ContentChannel)>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<GeneratedContent> {
    let session = query.name()?;
    let page = state.page(session).map_err(api_error)?;

    info!(session, customer_id = id, channel = channel.as_str(), "Content generation requested");
    page.generate(id, channel).await.map(Json).map_err(api_error)
}

/// GET /v1/customers/{id}/expanded/{kind}: Open the full insight or
/// recommendation dialog.
#[utoipa::path(
    get,
    path = "/v1/customers/{id}/expanded/{kind}",
    tag = "Customers",
    params(
        ("id" = u32, Path, description = "Customer identifier"),
        ("kind" = ExpandedKind, Path, description = "insight or recommendation"),
        SessionQuery,
    ),
    responses(
        (status = 200, description = "Expanded dialog"),
        (status = 404, description = "Unknown customer", body = ErrorResponse),
    )
)]
pub async fn handle_expand(
    State(state): State<AppState>,
    Path((id, kind)): Path<(u32, ExpandedKind)>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<CustomerDialog> {
    let session = query.name()?;
    state
        .page(session)
        .and_then(|page| page.expand(id, kind))
        .map(Json)
        .map_err(api_error)
}

/// GET /v1/sessions/{session}/dialog: Current dialog of a session.
#[utoipa::path(
    get,
    path = "/v1/sessions/{session}/dialog",
    tag = "Customers",
    params(("session" = String, Path, description = "Dashboard session name")),
    responses((status = 200, description = "Current dialog state"))
)]
pub async fn handle_get_dialog(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> ApiResult<CustomerDialog> {
    validate_session(&session)?;
    let dialog = state
        .existing_page(&session)
        .map(|page| page.dialog())
        .unwrap_or_default();
    Ok(Json(dialog))
}

/// DELETE /v1/sessions/{session}/generation: Cancel in-flight generation.
#[utoipa::path(
    delete,
    path = "/v1/sessions/{session}/generation",
    tag = "Customers",
    params(("session" = String, Path, description = "Dashboard session name")),
    responses((status = 200, description = "Whether a generation was cancelled", body = CancelResponse))
)]
pub async fn handle_cancel_generation(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> ApiResult<CancelResponse> {
    validate_session(&session)?;
    let cancelled = state
        .existing_page(&session)
        .map(|page| page.cancel_generation())
        .unwrap_or(false);
    state.evict_if_idle(&session);
    info!(session = %session, cancelled, "Generation cancel requested");
    Ok(Json(CancelResponse { cancelled }))
}

/// DELETE /v1/sessions/{session}/dialog: Close whatever dialog is open.
///
/// A session left with nothing open or running is forgotten.
#[utoipa::path(
    delete,
    path = "/v1/sessions/{session}/dialog",
    tag = "Customers",
    params(("session" = String, Path, description = "Dashboard session name")),
    responses((status = 204, description = "Dialog closed"))
)]
pub async fn handle_close_dialog(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    validate_session(&session)?;
    if let Some(page) = state.existing_page(&session) {
        page.close();
    }
    state.evict_if_idle(&session);
    Ok(StatusCode::NO_CONTENT)
}
