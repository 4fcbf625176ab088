use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::api::NewsSource;
use crate::error::Error;
use crate::models::cache::TtlCache;
use crate::models::news::NewsArticle;
use crate::services::rate_limiter::RateLimiter;
use crate::services::trading_day::resolve_window_start;

const NEWS_CACHE_KEY: &str = "news";
/// Rate-limiter slot shared by every news fetch in the process.
pub const NEWS_ENDPOINT: &str = "gnews";
const MAX_ARTICLES: usize = 10;

/// News orchestration: trading-window resolution, throttling, caching, and
/// the stale-on-error fallback.
///
/// This path favors availability over freshness. A rate-limited, failed, or
/// empty fetch serves the last successfully fetched list (even one older than
/// the cache TTL) and only returns an empty list before any fetch has ever
/// succeeded.
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    limiter: Arc<RateLimiter>,
    cache: TtlCache<Vec<NewsArticle>>,
    last_good: Mutex<Vec<NewsArticle>>,
}

impl NewsService {
    pub fn new(
        source: Arc<dyn NewsSource>,
        limiter: Arc<RateLimiter>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            source,
            limiter,
            cache: TtlCache::new(cache_ttl),
            last_good: Mutex::new(Vec::new()),
        }
    }

    /// Headlines for the current trading window, most recent first.
    pub async fn market_news(&self) -> Vec<NewsArticle> {
        if let Some(cached) = self.cache.get(NEWS_CACHE_KEY) {
            return cached;
        }

        let window_start = resolve_window_start(Utc::now());
        self.limiter.throttle(NEWS_ENDPOINT).await;

        match self.source.search(window_start, MAX_ARTICLES).await {
            Ok(articles) => {
                let recent: Vec<NewsArticle> = articles
                    .into_iter()
                    .filter(|article| article.date_published.date_naive() >= window_start)
                    .take(MAX_ARTICLES)
                    .collect();

                if recent.is_empty() {
                    warn!(%window_start, "no articles within the trading window");
                    return self.last_known();
                }

                debug!(count = recent.len(), "news cache replaced");
                self.cache.set(NEWS_CACHE_KEY, recent.clone());
                *self.last_good.lock().unwrap() = recent.clone();
                recent
            }
            Err(Error::RateLimited) => {
                warn!("news provider rate limited, serving cached articles");
                self.last_known()
            }
            Err(e) => {
                error!(error = %e, "news fetch failed, serving cached articles");
                self.last_known()
            }
        }
    }

    fn last_known(&self) -> Vec<NewsArticle> {
        self.last_good.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::VecDeque;

    struct StubSource {
        responses: Mutex<VecDeque<Result<Vec<NewsArticle>>>>,
    }

    impl StubSource {
        fn new(responses: Vec<Result<Vec<NewsArticle>>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
            })
        }
    }

    #[async_trait]
    impl NewsSource for StubSource {
        async fn search(
            &self,
            _window_start: NaiveDate,
            _max_results: usize,
        ) -> Result<Vec<NewsArticle>> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected upstream call")
        }
    }

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: Some("desc".to_string()),
            url: format!("https://example.com/{title}"),
            provider: "Example Wire".to_string(),
            date_published: Utc::now(),
            content: None,
        }
    }

    fn service(source: Arc<StubSource>, ttl: Duration) -> NewsService {
        NewsService::new(
            source,
            Arc::new(RateLimiter::new(Duration::from_secs(10))),
            ttl,
        )
    }

    const TTL: Duration = Duration::from_secs(900);

    #[tokio::test(start_paused = true)]
    async fn successful_fetch_replaces_cache() {
        let stub = StubSource::new(vec![Ok(vec![article("first"), article("second")])]);
        let news = service(stub, TTL);

        let list = news.market_news().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "first");
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_cache_skips_the_upstream() {
        // A second upstream call would panic the stub.
        let stub = StubSource::new(vec![Ok(vec![article("only")])]);
        let news = service(stub, TTL);

        let first = news.market_news().await;
        let second = news.market_news().await;
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_fetch_serves_last_cached_list() {
        let stub = StubSource::new(vec![
            Ok(vec![article("kept")]),
            Err(Error::RateLimited),
        ]);
        let news = service(stub, TTL);

        let first = news.market_news().await;
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let second = news.market_news().await;

        assert_eq!(second, first);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_results_fall_back_to_cache() {
        let stub = StubSource::new(vec![Ok(vec![article("kept")]), Ok(Vec::new())]);
        let news = service(stub, TTL);

        let first = news.market_news().await;
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let second = news.market_news().await;

        assert_eq!(second, first);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_with_no_history_returns_empty() {
        let stub = StubSource::new(vec![Err(Error::RateLimited)]);
        let news = service(stub, TTL);

        assert!(news.market_news().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn upstream_failure_falls_back_to_cache() {
        let stub = StubSource::new(vec![
            Ok(vec![article("kept")]),
            Err(Error::UpstreamStatus {
                endpoint: "gnews",
                status: 500,
            }),
        ]);
        let news = service(stub, TTL);

        let first = news.market_news().await;
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        assert_eq!(news.market_news().await, first);
    }
}
