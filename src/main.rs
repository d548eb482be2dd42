use anyhow::{Context, Result};
use guildbot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        tracing_subscriber::EnvFilter::new(format!(
            "{},teloxide=warn,hyper=warn,reqwest=warn",
            level.to_lowercase()
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().context("failed to load configuration from environment")?;
    tracing::info!("starting guildbot {}", guildbot::VERSION);
    tracing::info!("{}", config);

    guildbot::bot::run(config).await
}
