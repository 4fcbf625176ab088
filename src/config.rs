use thiserror::Error;

/// Environment variable holding the GNews API key.
pub const GNEWS_API_KEY: &str = "GNEWS_API_KEY";
/// Environment variable holding the Anthropic API key.
pub const CLAUDE_API_KEY: &str = "CLAUDE_API_KEY";

const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {name}")]
    MissingVar { name: &'static str },

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Process configuration, read once at startup. Both upstream credentials are
/// required; the process must not start serving without them.
#[derive(Debug, Clone)]
pub struct Config {
    pub gnews_api_key: String,
    pub claude_api_key: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gnews_api_key: require(GNEWS_API_KEY)?,
            claude_api_key: require(CLAUDE_API_KEY)?,
            port: match std::env::var("PORT") {
                Ok(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        name: "PORT",
                        reason: e.to_string(),
                    }
                })?,
                Err(_) => DEFAULT_PORT,
            },
        })
    }
}

/// An empty value counts as missing.
fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar { name })
}
