use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::NewsSource;
use crate::error::{Error, Result};
use crate::models::news::NewsArticle;

const SEARCH_URL: &str = "https://gnews.io/api/v4/search";
const QUERY: &str = "stock market OR \"S&P 500\" OR nasdaq OR \"dow jones\"";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the GNews search endpoint. The free tier rate-limits hard, so
/// callers are expected to throttle and to treat 429 as a soft failure.
pub struct GnewsApi {
    client: Client,
    api_key: String,
}

impl GnewsApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
struct RawArticle {
    title: String,
    description: Option<String>,
    url: String,
    content: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
    source: RawSource,
}

#[derive(Deserialize)]
struct RawSource {
    name: String,
}

impl From<RawArticle> for NewsArticle {
    fn from(raw: RawArticle) -> Self {
        NewsArticle {
            title: raw.title,
            description: raw.description,
            url: raw.url,
            provider: raw.source.name,
            date_published: raw.published_at,
            content: raw.content,
        }
    }
}

#[async_trait]
impl NewsSource for GnewsApi {
    async fn search(
        &self,
        window_start: NaiveDate,
        max_results: usize,
    ) -> Result<Vec<NewsArticle>> {
        let max = max_results.to_string();
        let from = format!("{}T00:00:00Z", window_start);
        debug!(%window_start, "searching market news");

        let response = self
            .client
            .get(SEARCH_URL)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("q", QUERY),
                ("lang", "en"),
                ("country", "us"),
                ("max", max.as_str()),
                ("sortby", "publishedAt"),
                ("from", from.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !response.status().is_success() {
            return Err(Error::UpstreamStatus {
                endpoint: "gnews",
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        debug!(count = body.articles.len(), "news search returned");
        Ok(body.articles.into_iter().map(NewsArticle::from).collect())
    }
}
