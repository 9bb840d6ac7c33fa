use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::ledger::Adjustment;
use crate::models::{Fund, LedgerEntry};

/// Append one ledger entry describing `adjustment` on `fund`.
pub async fn insert_entry(
    conn: &mut PgConnection,
    fund: &Fund,
    adjustment: &Adjustment,
) -> Result<LedgerEntry, sqlx::Error> {
    sqlx::query_as::<_, LedgerEntry>(
        r#"
        INSERT INTO transactions
            (fund_id, fund_name, amount, previous_amount, new_amount, operation_kind, operation)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(fund.id)
    .bind(&fund.name)
    .bind(adjustment.amount)
    .bind(adjustment.previous_amount)
    .bind(adjustment.new_amount)
    .bind(adjustment.kind.as_str())
    .bind(adjustment.operation_text())
    .fetch_one(conn)
    .await
}

/// Most recent entries across all funds, newest first.
pub async fn list_recent(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<LedgerEntry>> {
    let entries = sqlx::query_as::<_, LedgerEntry>(
        "SELECT * FROM transactions ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Most recent entries for one fund id, newest first. Works for deleted funds too.
pub async fn list_for_fund(
    pool: &PgPool,
    fund_id: Uuid,
    limit: i64,
) -> anyhow::Result<Vec<LedgerEntry>> {
    let entries = sqlx::query_as::<_, LedgerEntry>(
        "SELECT * FROM transactions WHERE fund_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(fund_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Delete one entry, returning it if it existed.
pub async fn delete_entry(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<LedgerEntry>> {
    let entry = sqlx::query_as::<_, LedgerEntry>(
        "DELETE FROM transactions WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(entry)
}

/// Remove every entry. Returns the number deleted.
pub async fn clear_all(pool: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM transactions").execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn count_entries(pool: &PgPool) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
