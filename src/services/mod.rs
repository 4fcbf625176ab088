pub mod analysis_service;
pub mod market_service;
pub mod news_service;
pub mod rate_limiter;
pub mod trading_day;
