use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Fund, FundKind};

/// Fields accepted when a fund is created. Validation happens in the handler.
#[derive(Debug, Clone)]
pub struct NewFund<'a> {
    pub name: &'a str,
    pub kind: FundKind,
    pub price: &'a str,
    pub total_amount: &'a str,
    pub payable_amount: &'a str,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct FundChanges<'a> {
    pub name: Option<&'a str>,
    pub kind: Option<FundKind>,
    pub total_amount: Option<&'a str>,
}

/// Insert a new fund record.
pub async fn create_fund(pool: &PgPool, fund: &NewFund<'_>) -> anyhow::Result<Fund> {
    let created = sqlx::query_as::<_, Fund>(
        r#"
        INSERT INTO funds (name, kind, price, total_amount, payable_amount)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(fund.name.trim())
    .bind(fund.kind.label())
    .bind(fund.price)
    .bind(fund.total_amount)
    .bind(fund.payable_amount)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// All funds, newest first.
pub async fn list_funds(pool: &PgPool) -> anyhow::Result<Vec<Fund>> {
    let funds = sqlx::query_as::<_, Fund>("SELECT * FROM funds ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(funds)
}

/// Funds of one kind, oldest first (refresh order).
pub async fn list_funds_by_kind(pool: &PgPool, kind: FundKind) -> anyhow::Result<Vec<Fund>> {
    let funds = sqlx::query_as::<_, Fund>(
        "SELECT * FROM funds WHERE kind = $1 ORDER BY created_at ASC",
    )
    .bind(kind.label())
    .fetch_all(pool)
    .await?;

    Ok(funds)
}

pub async fn get_fund(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Fund>> {
    let fund = sqlx::query_as::<_, Fund>("SELECT * FROM funds WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(fund)
}

/// Load a fund and lock its row until the surrounding transaction ends.
pub async fn get_fund_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<Fund>, sqlx::Error> {
    sqlx::query_as::<_, Fund>("SELECT * FROM funds WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Overwrite the payable amount. Only the payable-adjustment service calls this.
pub async fn set_payable_amount(
    conn: &mut PgConnection,
    id: Uuid,
    payable_amount: &str,
) -> Result<Fund, sqlx::Error> {
    sqlx::query_as::<_, Fund>(
        "UPDATE funds SET payable_amount = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(payable_amount)
    .fetch_one(conn)
    .await
}

/// Apply a partial update. Returns `None` if the fund does not exist.
pub async fn update_fund(
    pool: &PgPool,
    id: Uuid,
    changes: &FundChanges<'_>,
) -> anyhow::Result<Option<Fund>> {
    let fund = sqlx::query_as::<_, Fund>(
        r#"
        UPDATE funds
        SET name = COALESCE($2, name),
            kind = COALESCE($3, kind),
            total_amount = COALESCE($4, total_amount)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(changes.name.map(str::trim))
    .bind(changes.kind.map(|k| k.label()))
    .bind(changes.total_amount)
    .fetch_optional(pool)
    .await?;

    Ok(fund)
}

/// Store a freshly scraped price. Only the price refresh job calls this.
pub async fn update_price(pool: &PgPool, id: Uuid, price: &str) -> anyhow::Result<bool> {
    let result = sqlx::query("UPDATE funds SET price = $2 WHERE id = $1")
        .bind(id)
        .bind(price)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a fund. Ledger entries that reference it are kept.
pub async fn delete_fund(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM funds WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
