use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    UpstreamStatus { endpoint: &'static str, status: u16 },

    #[error("malformed response from {endpoint}: {detail}")]
    MalformedResponse {
        endpoint: &'static str,
        detail: String,
    },

    /// News provider returned 429. Handled inside the news path by serving
    /// the last cached article list; never reaches the HTTP caller.
    #[error("news provider rate limited")]
    RateLimited,

    #[error("analysis failed: {0}")]
    AnalysisUnavailable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
