use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for transactions table: one payable-amount adjustment.
///
/// `fund_id` is a historical pointer, not a foreign key. The fund may be
/// deleted later while the entry keeps its `fund_name` copy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub fund_id: Uuid,
    pub fund_name: String,
    pub amount: Decimal,
    pub previous_amount: Decimal,
    pub new_amount: Decimal,
    pub operation_kind: String,
    pub operation: String,
    pub created_at: DateTime<Utc>,
}
