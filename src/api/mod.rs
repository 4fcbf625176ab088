pub mod anthropic;
pub mod gnews;
pub mod yahoo;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::news::NewsArticle;

/// News-search provider queried by the news path.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Searches for market news published on or after `window_start`,
    /// returning at most `max_results` articles, most recent first.
    async fn search(&self, window_start: NaiveDate, max_results: usize)
        -> Result<Vec<NewsArticle>>;
}

/// Text-completion provider behind the analysis path. The returned text is
/// treated as opaque.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
