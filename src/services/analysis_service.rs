use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::api::Completion;
use crate::error::{Error, Result};
use crate::models::cache::TtlCache;
use crate::models::market::MarketDirection;
use crate::models::news::NewsArticle;

/// Analysis orchestration: a fingerprint-keyed cache in front of a single
/// completion call.
///
/// The cache key is the coarse pair (direction, article count), not a content
/// hash, so a repeated dashboard refresh within the TTL costs zero LLM calls.
/// This path favors correctness over availability: an LLM failure propagates
/// and nothing is cached.
pub struct AnalysisService {
    llm: Arc<dyn Completion>,
    cache: TtlCache<String>,
}

impl AnalysisService {
    pub fn new(llm: Arc<dyn Completion>, cache_ttl: Duration) -> Self {
        Self {
            llm,
            cache: TtlCache::new(cache_ttl),
        }
    }

    pub async fn analyze(
        &self,
        articles: &[NewsArticle],
        direction: MarketDirection,
    ) -> Result<String> {
        let cache_key = format!("{}:{}", direction, articles.len());
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let prompt = build_prompt(articles, direction);
        let analysis = self
            .llm
            .complete(&prompt)
            .await
            .map_err(|e| Error::AnalysisUnavailable(e.to_string()))?;

        info!(%direction, articles = articles.len(), "analysis generated");
        debug!(key = %cache_key, "analysis cached");
        self.cache.set(&cache_key, analysis.clone());
        Ok(analysis)
    }
}

fn build_prompt(articles: &[NewsArticle], direction: MarketDirection) -> String {
    let formatted = articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let content = article
                .content
                .as_deref()
                .or(article.description.as_deref())
                .unwrap_or("");
            format!(
                "Article {}:\nTitle: {}\nSource: {}\nContent: {}\n",
                i + 1,
                article.title,
                article.provider,
                content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Most plausible reason why stocks are {direction} today. In your answer, \
         prioritize the most important and broadest reasons, such as macroeconomic \
         factors over a single stock, unless that stock is significantly driving \
         market sentiment. Reference specific news articles using (1), (2), etc. \
         as footnotes. Do not make any predictions about the future.\n\n{formatted}"
    )
}
