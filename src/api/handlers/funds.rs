use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db::fund_repo::{self, FundChanges, NewFund};
use crate::errors::AppError;
use crate::ledger::numbers::is_non_negative_number;
use crate::models::fund::UNKNOWN_PRICE;
use crate::models::{Fund, FundKind};
use crate::services::payable::{apply_payable_adjustment, PayableUpdate};
use crate::AppState;

use super::{parse_id, string_or_number, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFundRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_amount: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub payable_amount: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFundRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_amount: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub payable_amount: Option<String>,
    pub price: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateKindRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
pub struct PayableRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    pub operation: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayableRequest {
    pub fund_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub operation: Option<String>,
}

fn parse_kind(raw: &str) -> Result<FundKind, AppError> {
    FundKind::from_label(raw)
        .ok_or_else(|| AppError::BadRequest("type must be FON or HİSSE".into()))
}

fn require_quantity(value: &str, field: &str) -> Result<(), AppError> {
    if is_non_negative_number(value) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{field} must be a non-negative number, got '{value}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/funds: all funds, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Fund>>>, AppError> {
    let funds = fund_repo::list_funds(&state.db).await?;
    metrics::gauge!("funds_tracked").set(funds.len() as f64);

    Ok(Json(ApiResponse::ok(funds)))
}

/// GET /api/funds/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Fund>>, AppError> {
    let fund = fund_repo::get_fund(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("fund not found".into()))?;

    Ok(Json(ApiResponse::ok(fund)))
}

/// POST /api/funds: create a fund
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateFundRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Fund>>), AppError> {
    let Json(body) = body?;
    let name = body.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::BadRequest("fund name is required".into()));
    }

    let kind = match body.kind.as_deref() {
        Some(raw) => parse_kind(raw)?,
        None => FundKind::default(),
    };

    let total_amount = body
        .total_amount
        .as_deref()
        .map(str::trim)
        .ok_or_else(|| AppError::BadRequest("totalAmount is required".into()))?;
    require_quantity(total_amount, "totalAmount")?;

    let payable_amount = body.payable_amount.as_deref().map(str::trim).unwrap_or("0");
    require_quantity(payable_amount, "payableAmount")?;

    let price = body
        .price
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(UNKNOWN_PRICE);

    let fund = fund_repo::create_fund(
        &state.db,
        &NewFund {
            name,
            kind,
            price,
            total_amount,
            payable_amount,
        },
    )
    .await?;

    tracing::info!(fund_id = %fund.id, name = %fund.name, kind = %kind, "Fund created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(fund))))
}

/// PUT /api/funds/{id}: edit name, type or total amount
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateFundRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Fund>>, AppError> {
    let Json(body) = body?;
    if body.payable_amount.is_some() {
        return Err(AppError::BadRequest(
            "payableAmount can only be changed through the payable operation endpoint".into(),
        ));
    }
    if body.price.is_some() {
        return Err(AppError::BadRequest(
            "price is maintained by the price refresh job".into(),
        ));
    }

    let name = body.name.as_deref().map(str::trim);
    if name == Some("") {
        return Err(AppError::BadRequest("fund name cannot be empty".into()));
    }

    let kind = body.kind.as_deref().map(parse_kind).transpose()?;

    let total_amount = body.total_amount.as_deref().map(str::trim);
    if let Some(total) = total_amount {
        require_quantity(total, "totalAmount")?;
    }

    let fund = fund_repo::update_fund(
        &state.db,
        id,
        &FundChanges {
            name,
            kind,
            total_amount,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("fund not found".into()))?;

    Ok(Json(ApiResponse::ok(fund)))
}

/// PUT /api/funds/{id}/type: switch between FON and HİSSE
pub async fn update_kind(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateKindRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Fund>>, AppError> {
    let Json(body) = body?;
    let kind = parse_kind(body.kind.as_deref().unwrap_or_default())?;

    let fund = fund_repo::update_fund(
        &state.db,
        id,
        &FundChanges {
            kind: Some(kind),
            ..Default::default()
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("fund not found".into()))?;

    Ok(Json(ApiResponse::ok(fund)))
}

/// DELETE /api/funds/{id}: ledger entries for the fund are kept
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    if !fund_repo::delete_fund(&state.db, id).await? {
        return Err(AppError::NotFound("fund not found".into()));
    }

    tracing::info!(fund_id = %id, "Fund deleted");
    Ok(Json(ApiResponse::ok(json!({ "id": id }))))
}

/// PUT /api/funds/{id}/payable: apply `{ operation }` to the payable amount
pub async fn update_payable(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<PayableRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PayableUpdate>>, AppError> {
    let Json(body) = body?;
    let operation = body
        .operation
        .ok_or_else(|| AppError::BadRequest("operation is required".into()))?;

    let update = apply_payable_adjustment(
        &state.db,
        id,
        &operation,
        state.config.negative_payable_policy,
    )
    .await?;

    Ok(Json(ApiResponse::ok(update)))
}

/// POST /api/update-payable: same as above with `{ fundId, operation }` in the body
pub async fn update_payable_by_body(
    State(state): State<AppState>,
    body: Result<Json<UpdatePayableRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PayableUpdate>>, AppError> {
    let Json(body) = body?;
    let (Some(fund_id), Some(operation)) = (body.fund_id, body.operation) else {
        return Err(AppError::BadRequest("fundId and operation are required".into()));
    };
    let fund_id = parse_id(&fund_id, "fundId")?;

    let update = apply_payable_adjustment(
        &state.db,
        fund_id,
        &operation,
        state.config.negative_payable_policy,
    )
    .await?;

    Ok(Json(ApiResponse::ok(update)))
}
