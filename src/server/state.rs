use std::sync::Arc;
use std::time::Duration;

use crate::api::anthropic::AnthropicApi;
use crate::api::gnews::GnewsApi;
use crate::config::Config;
use crate::services::analysis_service::AnalysisService;
use crate::services::market_service::MarketService;
use crate::services::news_service::NewsService;
use crate::services::rate_limiter::RateLimiter;

/// Every cached resource class expires on the same 15-minute clock.
const CACHE_TTL: Duration = Duration::from_secs(15 * 60);
/// Minimum spacing between calls to the news provider.
const NEWS_MIN_INTERVAL: Duration = Duration::from_secs(10);

/// Shared state for all handlers. Constructed once at startup; the services
/// own their caches and the news service shares the process-wide limiter.
pub struct AppState {
    pub market: MarketService,
    pub news: NewsService,
    pub analysis: AnalysisService,
}

impl AppState {
    pub fn from_config(config: &Config) -> Arc<Self> {
        let limiter = Arc::new(RateLimiter::new(NEWS_MIN_INTERVAL));

        Arc::new(Self {
            market: MarketService::new(CACHE_TTL),
            news: NewsService::new(
                Arc::new(GnewsApi::new(config.gnews_api_key.clone())),
                limiter,
                CACHE_TTL,
            ),
            analysis: AnalysisService::new(
                Arc::new(AnthropicApi::new(config.claude_api_key.clone())),
                CACHE_TTL,
            ),
        })
    }
}
