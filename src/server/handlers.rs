use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::AppState;
use crate::models::market::{IntradayPoint, MarketDirection, MarketQuote};
use crate::models::news::NewsArticle;

/// GET /market/data - snapshot of every tracked index.
pub async fn market_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HashMap<String, MarketQuote>>, ApiError> {
    let data = state.market.market_data().await?;
    Ok(Json(data))
}

/// GET /market/intraday/{index} - trailing five-day series; an unknown index
/// or upstream failure is an empty array, never an error.
pub async fn intraday(
    State(state): State<Arc<AppState>>,
    Path(index): Path<String>,
) -> Json<Vec<IntradayPoint>> {
    Json(state.market.intraday(&index).await)
}

/// GET /news - headlines for the current trading window.
pub async fn news(State(state): State<Arc<AppState>>) -> Json<Vec<NewsArticle>> {
    Json(state.news.market_news().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub articles: Vec<NewsArticle>,
    pub market_direction: MarketDirection,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

/// POST /analysis - narrative explanation of the day's move.
pub async fn analysis(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    if request.articles.is_empty() {
        return Err(ApiError::BadRequest("articles cannot be empty".into()));
    }

    let analysis = state
        .analysis
        .analyze(&request.articles, request.market_direction)
        .await?;
    Ok(Json(AnalysisResponse { analysis }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health - liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
