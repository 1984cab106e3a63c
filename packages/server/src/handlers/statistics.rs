use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::AppError;
use crate::models::statistics::StatisticsResponse;
use crate::repo;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/statistics",
    tag = "Statistics",
    operation_id = "getStatistics",
    summary = "Dashboard statistics",
    description = "Returns the total customer count, per-region counts, the ten most recent communications, and the ten most active customers.",
    responses(
        (status = 200, description = "Statistics", body = StatisticsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, AppError> {
    Ok(Json(repo::statistics::statistics(&state.db).await?))
}
