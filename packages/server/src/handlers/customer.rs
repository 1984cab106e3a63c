use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::customer::{
    CreateCustomerRequest, CustomerActivityItem, CustomerResponse, RegionCount, SearchQuery,
    UpdateCustomerRequest,
};
use crate::repo;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/regions",
    tag = "Regions",
    operation_id = "listRegions",
    summary = "List regions with customer counts",
    description = "Returns the ten fixed administrative regions with the number of customers in each. Regions without customers are included with a zero count.",
    responses(
        (status = 200, description = "Region list", body = Vec<RegionCount>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_regions(
    State(state): State<AppState>,
) -> Result<Json<Vec<RegionCount>>, AppError> {
    Ok(Json(repo::customer::count_by_region(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/regions/{region}/customers",
    tag = "Customers",
    operation_id = "listCustomersByRegion",
    summary = "List customers in a region",
    description = "Returns all customers in the region, most recently updated first, each annotated with its communication count and last communication time.",
    params(("region" = String, Path, description = "Region name")),
    responses(
        (status = 200, description = "Customers in the region", body = Vec<CustomerActivityItem>),
        (status = 400, description = "Unknown region (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(region = %region))]
pub async fn list_customers_by_region(
    State(state): State<AppState>,
    Path(region): Path<String>,
) -> Result<Json<Vec<CustomerActivityItem>>, AppError> {
    Ok(Json(
        repo::customer::list_by_region(&state.db, &region).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/regions/{region}/customers",
    tag = "Customers",
    operation_id = "createCustomer",
    summary = "Create a customer in a region",
    description = "Creates a customer. When `initial_communication` is present and non-blank, a first communication log is recorded atomically with the customer.",
    params(("region" = String, Path, description = "Region name")),
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(region = %region))]
pub async fn create_customer(
    State(state): State<AppState>,
    Path(region): Path<String>,
    AppJson(payload): AppJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let model = repo::customer::create(&state.db, &region, payload).await?;
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/customers/search",
    tag = "Customers",
    operation_id = "searchCustomers",
    summary = "Search customers",
    description = "Case-insensitive substring search over company name, contact person, and address. A blank query returns an empty list.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching customers", body = Vec<CustomerActivityItem>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn search_customers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CustomerActivityItem>>, AppError> {
    let q = query.q.unwrap_or_default();
    Ok(Json(repo::customer::search(&state.db, &q).await?))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Customers",
    operation_id = "getCustomer",
    summary = "Get a customer by ID",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = CustomerResponse),
        (status = 404, description = "Customer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerResponse>, AppError> {
    let model = repo::customer::get(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Customers",
    operation_id = "updateCustomer",
    summary = "Update a customer",
    description = "Replaces the customer's mutable fields and bumps `last_updated_at`. The region and creation time are immutable.",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Customer not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, AppError> {
    let model = repo::customer::update(&state.db, id, payload).await?;
    Ok(Json(model.into()))
}
