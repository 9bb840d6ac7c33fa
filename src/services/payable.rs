use metrics::counter;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{fund_repo, ledger_repo};
use crate::ledger::numbers::parse_quantity;
use crate::ledger::{plan_adjustment, AdjustmentError, NegativePayablePolicy, Operation};
use crate::models::{Fund, LedgerEntry};

#[derive(Debug, Error)]
pub enum PayableError {
    #[error("fund {0} not found")]
    FundNotFound(Uuid),

    #[error(transparent)]
    Rejected(#[from] AdjustmentError),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result of a successful adjustment: the updated fund and its new ledger entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayableUpdate {
    pub fund: Fund,
    pub transaction: LedgerEntry,
    pub previous_amount: Decimal,
    pub new_amount: Decimal,
    pub operation: String,
}

/// Apply `operation_text` to the fund's payable amount and log it.
///
/// The fund row is locked for the duration of the database transaction, and
/// the fund update and ledger insert commit together or not at all.
pub async fn apply_payable_adjustment(
    pool: &PgPool,
    fund_id: Uuid,
    operation_text: &str,
    policy: NegativePayablePolicy,
) -> Result<PayableUpdate, PayableError> {
    let operation = match Operation::parse(operation_text) {
        Ok(op) => op,
        Err(e) => {
            counter!("payable_adjustments_rejected").increment(1);
            return Err(e.into());
        }
    };

    let mut tx = pool.begin().await?;

    let fund = fund_repo::get_fund_for_update(&mut *tx, fund_id)
        .await?
        .ok_or(PayableError::FundNotFound(fund_id))?;

    let previous = parse_quantity(&fund.payable_amount);
    let adjustment = match plan_adjustment(previous, &operation, policy) {
        Ok(adj) => adj,
        Err(e) => {
            // Dropping `tx` rolls back and releases the row lock.
            counter!("payable_adjustments_rejected").increment(1);
            tracing::warn!(
                fund_id = %fund_id,
                fund = %fund.name,
                operation = %operation,
                error = %e,
                "Payable adjustment rejected"
            );
            return Err(e.into());
        }
    };

    let updated = fund_repo::set_payable_amount(
        &mut *tx,
        fund.id,
        &adjustment.new_amount.to_string(),
    )
    .await?;
    let entry = ledger_repo::insert_entry(&mut *tx, &fund, &adjustment).await?;

    tx.commit().await?;

    counter!("payable_adjustments_total").increment(1);
    tracing::info!(
        fund_id = %fund.id,
        fund = %fund.name,
        previous = %adjustment.previous_amount,
        new = %adjustment.new_amount,
        operation = %entry.operation,
        "Payable amount adjusted"
    );

    Ok(PayableUpdate {
        fund: updated,
        previous_amount: adjustment.previous_amount,
        new_amount: adjustment.new_amount,
        operation: entry.operation.clone(),
        transaction: entry,
    })
}
