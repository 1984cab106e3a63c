use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::communication::{AddCommunicationRequest, CommunicationResponse};
use crate::repo;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/customers/{id}/communications",
    tag = "Communications",
    operation_id = "listCommunications",
    summary = "List a customer's communication history",
    description = "Returns the customer's communication logs, newest first.",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Communication history", body = Vec<CommunicationResponse>),
        (status = 404, description = "Customer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(customer_id))]
pub async fn list_communications(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<Vec<CommunicationResponse>>, AppError> {
    let logs = repo::communication::list(&state.db, customer_id).await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/customers/{id}/communications",
    tag = "Communications",
    operation_id = "addCommunication",
    summary = "Record a communication with a customer",
    description = "Appends a communication log and bumps the customer's `last_updated_at`, atomically. Logs are append-only and cannot be edited or deleted.",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = AddCommunicationRequest,
    responses(
        (status = 201, description = "Communication recorded", body = CommunicationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Customer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(customer_id))]
pub async fn add_communication(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    AppJson(payload): AppJson<AddCommunicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let log = repo::communication::add(&state.db, customer_id, payload).await?;
    Ok((StatusCode::CREATED, Json(CommunicationResponse::from(log))))
}
