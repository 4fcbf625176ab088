mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/market/data", get(handlers::market_data))
        .route("/market/intraday/{index}", get(handlers::intraday))
        .route("/news", get(handlers::news))
        .route("/analysis", post(handlers::analysis))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
