use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;

use fundtrack::api::router::create_router;
use fundtrack::config::AppConfig;
use fundtrack::pricing::WebPriceSource;
use fundtrack::services::price_refresh::{run_price_refresh_scheduler, PriceRefresher, RefreshPacing};
use fundtrack::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics()?;

    // --- Price refresh: web scraper + daily schedule ---
    let source = WebPriceSource::new(
        &config.fund_price_base_url,
        &config.stock_price_page_url,
        Duration::from_secs(config.price_fetch_timeout_secs),
    )?;
    let pacing = RefreshPacing {
        fund_delay: Duration::from_secs(config.fund_refresh_delay_secs),
        stock_delay: Duration::from_secs(config.stock_refresh_delay_secs),
    };
    let price_refresher = Arc::new(PriceRefresher::new(Arc::new(source), pacing));

    if config.price_refresh_enabled {
        let offset = FixedOffset::east_opt(config.price_refresh_utc_offset_hours * 3600)
            .ok_or_else(|| anyhow::anyhow!("invalid PRICE_REFRESH_UTC_OFFSET_HOURS"))?;
        let refresher = Arc::clone(&price_refresher);
        let scheduler_pool = pool.clone();
        let hour = config.price_refresh_hour;

        tokio::spawn(async move {
            run_price_refresh_scheduler(refresher, scheduler_pool, hour, offset).await;
        });

        tracing::info!(
            hour,
            utc_offset_hours = config.price_refresh_utc_offset_hours,
            "Daily price refresh scheduled"
        );
    } else {
        tracing::info!("Price refresh scheduler disabled (PRICE_REFRESH_ENABLED=false)");
    }

    if !config.has_api_token() {
        tracing::warn!("API_TOKEN is not set, API authentication is disabled");
    }

    let state = AppState {
        db: pool.clone(),
        config,
        metrics_handle,
        price_refresher,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shut down cleanly");

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
