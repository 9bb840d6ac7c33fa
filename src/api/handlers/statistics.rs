use axum::extract::State;
use axum::Json;

use crate::db::fund_repo;
use crate::errors::AppError;
use crate::ledger::{compute_debt_statistics, DebtStatistics};
use crate::AppState;

use super::ApiResponse;

/// GET /api/statistics: total / paid / remaining debt over all funds
pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DebtStatistics>>, AppError> {
    let funds = fund_repo::list_funds(&state.db).await?;

    Ok(Json(ApiResponse::ok(compute_debt_statistics(&funds))))
}
