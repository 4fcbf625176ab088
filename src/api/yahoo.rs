use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

const BASE_URL: &str = "https://query1.finance.yahoo.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the market-quote provider. Payloads come back as loosely
/// structured JSON; callers navigate the `chart.result[0]` envelope.
pub struct YahooApi {
    client: Client,
}

impl YahooApi {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetches the current chart snapshot for one symbol; the quote fields
    /// live under `chart.result[0].meta`.
    pub async fn chart(&self, symbol: &str) -> Result<Value> {
        let url = format!("{}/v8/finance/chart/{}", BASE_URL, symbol);
        debug!(symbol, "fetching quote chart");

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::UpstreamStatus {
                endpoint: "yahoo",
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetches daily close data between two epoch-second bounds.
    pub async fn chart_range(&self, symbol: &str, period1: i64, period2: i64) -> Result<Value> {
        let url = format!("{}/v8/finance/chart/{}", BASE_URL, symbol);
        debug!(symbol, period1, period2, "fetching chart range");

        let period1 = period1.to_string();
        let period2 = period2.to_string();
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("interval", "1d"),
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("range", "5d"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::UpstreamStatus {
                endpoint: "yahoo",
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

impl Default for YahooApi {
    fn default() -> Self {
        Self::new()
    }
}
