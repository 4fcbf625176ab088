use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Completion;
use crate::error::{Error, Result};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-opus-20240229";
const MAX_TOKENS: usize = 1000;
const TEMPERATURE: f64 = 0.7;
// Completions are slow; allow well beyond the market/news timeouts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Anthropic messages-API client.
pub struct AnthropicApi {
    client: Client,
    api_key: String,
}

impl AnthropicApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
struct Request {
    model: &'static str,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

#[async_trait]
impl Completion for AnthropicApi {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = Request {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };
        debug!(model = MODEL, prompt_len = prompt.len(), "requesting completion");

        let response = self
            .client
            .post(API_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::UpstreamStatus {
                endpoint: "anthropic",
                status: response.status().as_u16(),
            });
        }

        let body: Response = response.json().await?;
        Ok(body
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
