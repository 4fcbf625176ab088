use std::error::Error;

use colored::Colorize;
use tracing::{error, info};

use market_pulse::config::{self, Config};
use market_pulse::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting market dashboard aggregator");
    print_env_check();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState::from_config(&config);
    let app = server::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_env_check() {
    println!("\nEnvironment variables:");
    for name in [config::GNEWS_API_KEY, config::CLAUDE_API_KEY] {
        let loaded = std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false);
        let status = if loaded {
            "✓ loaded".green()
        } else {
            "✗ missing".red()
        };
        println!("  {name:<16} {status}");
    }
    println!();
}
