use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::FundKind;

/// Price placeholder used until the refresh job finds a quote.
pub const UNKNOWN_PRICE: &str = "-";

/// Database row for funds table.
///
/// Quantities and price are kept as text to stay compatible with the
/// existing records; they are parsed at read time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: String,
    pub total_amount: String,
    pub payable_amount: String,
    pub created_at: DateTime<Utc>,
}

impl Fund {
    /// Parsed kind; unknown labels fall back to the default kind.
    pub fn fund_kind(&self) -> FundKind {
        FundKind::from_label(&self.kind).unwrap_or_default()
    }
}
