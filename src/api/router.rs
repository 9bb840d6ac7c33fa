use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_auth;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes: require Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Funds
        .route("/api/funds", get(handlers::funds::list).post(handlers::funds::create))
        .route(
            "/api/funds/:id",
            get(handlers::funds::detail)
                .put(handlers::funds::update)
                .delete(handlers::funds::delete),
        )
        .route("/api/funds/:id/type", put(handlers::funds::update_kind))
        .route("/api/funds/:id/payable", put(handlers::funds::update_payable))
        .route("/api/update-payable", post(handlers::funds::update_payable_by_body))
        // Statistics
        .route("/api/statistics", get(handlers::statistics::summary))
        // Ledger
        .route(
            "/api/transactions",
            get(handlers::transactions::list).delete(handlers::transactions::clear),
        )
        .route("/api/transactions/:id", axum::routing::delete(handlers::transactions::delete))
        .route("/api/transactions/fund/:fund_id", get(handlers::transactions::list_for_fund))
        // Prices
        .route("/api/update-fund-prices", post(handlers::prices::refresh))
        .route("/api/test-fund-price", post(handlers::prices::probe))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // The dashboard is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
