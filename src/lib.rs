pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod services;

// Re-export commonly used items
pub use services::analysis_service::AnalysisService;
pub use services::market_service::MarketService;
pub use services::news_service::NewsService;
pub use services::rate_limiter::RateLimiter;
