use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::FundKind;
use crate::services::price_refresh::RefreshReport;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRequest {
    pub fund_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub fund_name: String,
    #[serde(rename = "type")]
    pub kind: FundKind,
    pub price: Option<String>,
}

/// POST /api/update-fund-prices: run the price refresh now
pub async fn refresh(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RefreshReport>>, AppError> {
    tracing::info!("Manual price refresh requested");
    let report = state.price_refresher.refresh_all(&state.db).await?;

    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/test-fund-price: fetch one price without storing it
pub async fn probe(
    State(state): State<AppState>,
    body: Result<Json<ProbeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ProbeResult>>, AppError> {
    let Json(body) = body?;
    let fund_name = body
        .fund_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("fundName is required".into()))?
        .to_string();

    let kind = match body.kind.as_deref() {
        Some(raw) => FundKind::from_label(raw)
            .ok_or_else(|| AppError::BadRequest("type must be FON or HİSSE".into()))?,
        None => FundKind::default(),
    };

    let price = state
        .price_refresher
        .probe(&fund_name, kind)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(ApiResponse::ok(ProbeResult {
        fund_name,
        kind,
        price,
    })))
}
