use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news headline, immutable once constructed. Consumed by both the
/// analysis prompt builder and the dashboard client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// Name of the publishing outlet.
    pub provider: String,
    pub date_published: DateTime<Utc>,
    pub content: Option<String>,
}
