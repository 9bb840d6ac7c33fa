use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use metrics::counter;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::db::fund_repo;
use crate::models::{Fund, FundKind};
use crate::pricing::{normalize_price, PriceFetchError, PriceSource};

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("a price refresh is already running")]
    AlreadyRunning,

    #[error("storage error: {0}")]
    Storage(anyhow::Error),
}

/// Pause between consecutive page fetches, per kind, to stay under the
/// sites' rate limits.
#[derive(Debug, Clone, Copy)]
pub struct RefreshPacing {
    pub fund_delay: Duration,
    pub stock_delay: Duration,
}

impl RefreshPacing {
    pub fn none() -> Self {
        Self {
            fund_delay: Duration::ZERO,
            stock_delay: Duration::ZERO,
        }
    }

    fn delay_for(&self, kind: FundKind) -> Duration {
        match kind {
            FundKind::Position => self.fund_delay,
            FundKind::Share => self.stock_delay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUpdateStatus {
    Updated,
    NoPrice,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FundKind,
    pub price: Option<String>,
    pub status: PriceUpdateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub results: Vec<PriceUpdate>,
}

impl RefreshReport {
    fn record(&mut self, update: PriceUpdate) {
        match update.status {
            PriceUpdateStatus::Updated => self.updated += 1,
            PriceUpdateStatus::NoPrice => self.skipped += 1,
            PriceUpdateStatus::Failed => self.failed += 1,
        }
        self.results.push(update);
    }
}

/// Walks every fund, asks the price source for a quote and stores it.
/// Funds go first, then shares; items are fetched one at a time.
pub struct PriceRefresher {
    source: Arc<dyn PriceSource>,
    pacing: RefreshPacing,
    running: Mutex<()>,
}

impl PriceRefresher {
    pub fn new(source: Arc<dyn PriceSource>, pacing: RefreshPacing) -> Self {
        Self {
            source,
            pacing,
            running: Mutex::new(()),
        }
    }

    /// Look up a single name without touching the database.
    pub async fn probe(
        &self,
        name: &str,
        kind: FundKind,
    ) -> Result<Option<String>, PriceFetchError> {
        self.source.fetch_price(name, kind).await
    }

    pub async fn refresh_all(&self, pool: &PgPool) -> Result<RefreshReport, RefreshError> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| RefreshError::AlreadyRunning)?;

        tracing::info!("Starting price refresh");
        let mut report = RefreshReport::default();

        for kind in FundKind::ALL {
            let funds = fund_repo::list_funds_by_kind(pool, kind)
                .await
                .map_err(RefreshError::Storage)?;
            tracing::info!(kind = %kind, count = funds.len(), "Refreshing prices");

            for (i, fund) in funds.iter().enumerate() {
                if i > 0 {
                    tokio::time::sleep(self.pacing.delay_for(kind)).await;
                }
                report.record(self.refresh_one(pool, fund).await);
            }
        }

        tracing::info!(
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "Price refresh completed"
        );
        Ok(report)
    }

    async fn refresh_one(&self, pool: &PgPool, fund: &Fund) -> PriceUpdate {
        let kind = fund.fund_kind();
        let mut update = PriceUpdate {
            name: fund.name.clone(),
            kind,
            price: None,
            status: PriceUpdateStatus::NoPrice,
            error: None,
        };

        let fetched = self
            .source
            .fetch_price(&fund.name, kind)
            .await
            .map(|price| price.as_deref().and_then(normalize_price));

        match fetched {
            Ok(Some(price)) => match fund_repo::update_price(pool, fund.id, &price).await {
                Ok(_) => {
                    counter!("price_updates_total").increment(1);
                    tracing::info!(fund = %fund.name, price = %price, "Price updated");
                    update.price = Some(price);
                    update.status = PriceUpdateStatus::Updated;
                }
                Err(e) => {
                    counter!("price_update_failures").increment(1);
                    tracing::error!(fund = %fund.name, error = %e, "Failed to store price");
                    update.status = PriceUpdateStatus::Failed;
                    update.error = Some(e.to_string());
                }
            },
            Ok(None) => {
                tracing::warn!(fund = %fund.name, "No price found");
            }
            Err(e) => {
                counter!("price_update_failures").increment(1);
                tracing::warn!(fund = %fund.name, error = %e, "Price fetch failed");
                update.status = PriceUpdateStatus::Failed;
                update.error = Some(e.to_string());
            }
        }

        update
    }
}

/// Next wall-clock occurrence of `hour:00` in `offset`, strictly after `now`.
pub fn next_run_after(
    now: DateTime<Utc>,
    hour: u32,
    offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let local_date = now.with_timezone(&offset).date_naive();
    let today = offset
        .from_local_datetime(&local_date.and_hms_opt(hour, 0, 0)?)
        .single()?
        .with_timezone(&Utc);

    if today > now {
        Some(today)
    } else {
        Some(today + chrono::Duration::days(1))
    }
}

/// Run `refresh_all` once a day at `hour` local time. Never returns unless
/// the hour cannot be represented.
pub async fn run_price_refresh_scheduler(
    refresher: Arc<PriceRefresher>,
    pool: PgPool,
    hour: u32,
    offset: FixedOffset,
) {
    loop {
        let now = Utc::now();
        let Some(next) = next_run_after(now, hour, offset) else {
            tracing::error!(hour, "Invalid price refresh hour, scheduler stopped");
            return;
        };

        tracing::info!(next_run = %next, "Next price refresh scheduled");
        tokio::time::sleep((next - now).to_std().unwrap_or(Duration::ZERO)).await;

        match refresher.refresh_all(&pool).await {
            Ok(report) => tracing::info!(
                updated = report.updated,
                failed = report.failed,
                "Scheduled price refresh finished"
            ),
            Err(e) => tracing::warn!(error = %e, "Scheduled price refresh skipped"),
        }
    }
}
