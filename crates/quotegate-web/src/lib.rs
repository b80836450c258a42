//! HTTP surface for quotegate.
//!
//! Thin glue over `quotegate-core`: route registration, parameter
//! validation, and the uniform `{code, message, data}` response envelope.
//! All market semantics live in the core crate.

pub mod envelope;
pub mod handlers;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use envelope::ApiResponse;
pub use state::AppState;

/// Build the full application router over a shared feed handle.
pub fn router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/quote", get(handlers::quote))
        .route("/api/kline", get(handlers::kline))
        .route("/api/minute", get(handlers::minute))
        .route("/api/trade", get(handlers::trade))
        .route("/api/search", get(handlers::search))
        .route("/api/stock-info", get(handlers::stock_info))
        .route("/api/codes", get(handlers::codes))
        .route("/api/batch-quote", post(handlers::batch_quote))
        .route("/api/kline-history", get(handlers::kline_history))
        .route("/api/index", get(handlers::index))
        .route("/api/market-stats", get(handlers::market_stats))
        .route("/api/status", get(handlers::status))
        .route("/api/health", get(handlers::health))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
