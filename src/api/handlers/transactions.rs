use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db::ledger_repo;
use crate::errors::AppError;
use crate::models::LedgerEntry;
use crate::AppState;

use super::ApiResponse;

/// GET /api/transactions: most recent ledger entries
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LedgerEntry>>>, AppError> {
    let entries = ledger_repo::list_recent(&state.db, state.config.transaction_list_limit).await?;

    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/transactions/fund/{fund_id}: history of one fund (also after deletion)
pub async fn list_for_fund(
    State(state): State<AppState>,
    Path(fund_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<LedgerEntry>>>, AppError> {
    let entries = ledger_repo::list_for_fund(
        &state.db,
        fund_id,
        state.config.fund_transaction_list_limit,
    )
    .await?;

    Ok(Json(ApiResponse::ok(entries)))
}

/// DELETE /api/transactions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let entry = ledger_repo::delete_entry(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("transaction not found".into()))?;
    let remaining = ledger_repo::count_entries(&state.db).await?;

    tracing::info!(
        transaction_id = %entry.id,
        fund = %entry.fund_name,
        operation = %entry.operation,
        remaining,
        "Ledger entry deleted"
    );

    Ok(Json(ApiResponse::ok(json!({
        "deletedTransaction": {
            "id": entry.id,
            "fundName": entry.fund_name,
            "operation": entry.operation,
        },
        "remainingCount": remaining,
    }))))
}

/// DELETE /api/transactions: wipe the whole ledger
pub async fn clear(State(state): State<AppState>) -> Result<Json<ApiResponse<Value>>, AppError> {
    let deleted = ledger_repo::clear_all(&state.db).await?;
    tracing::warn!(deleted, "Ledger cleared");

    Ok(Json(ApiResponse::ok(json!({ "deletedCount": deleted }))))
}
