pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod pricing;
pub mod services;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::price_refresh::PriceRefresher;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub price_refresher: Arc<PriceRefresher>,
}
