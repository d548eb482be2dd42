use std::fmt;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::errors::GuildbotError;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BOT_NAME: &str = "Gemini AI Training Assistant";
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Deployment environment, from the `ENVIRONMENT` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Runtime configuration. Environment variables are the only configuration
/// surface; a `.env` file is honored for local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Public base URL the hosting platform routes to this process.
    /// Presence switches the bot from long polling to webhook delivery.
    pub webhook_url: Option<Url>,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub bot_name: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, GuildbotError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. `from_env` is the
    /// thin wrapper over `std::env::var`; tests inject a map instead of
    /// mutating process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GuildbotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("loading configuration from environment");

        let telegram_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;
        let gemini_api_key = required(&lookup, "GEMINI_API_KEY")?;

        let gemini_model = optional(&lookup, "GEMINI_MODEL")
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let webhook_url = optional(&lookup, "WEBHOOK_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    GuildbotError::Config(format!("WEBHOOK_URL is not a valid URL: {}", e))
                })
            })
            .transpose()?;

        let environment = optional(&lookup, "ENVIRONMENT")
            .map_or(Environment::Development, |v| Environment::parse(&v));

        let host = optional(&lookup, "HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match optional(&lookup, "PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                GuildbotError::Config(format!(
                    "PORT must be a number between 1 and 65535, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_PORT,
        };

        let bot_name = optional(&lookup, "BOT_NAME").unwrap_or_else(|| DEFAULT_BOT_NAME.to_string());

        let log_level = optional(&lookup, "LOG_LEVEL")
            .map_or_else(|| "info".to_string(), |v| v.to_lowercase());

        let config = Self {
            telegram_token,
            gemini_api_key,
            gemini_model,
            webhook_url,
            environment,
            host,
            port,
            bot_name,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GuildbotError> {
        self.validate_telegram_token()?;
        self.validate_webhook()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_telegram_token(&self) -> Result<(), GuildbotError> {
        let shape = Regex::new(r"^\d+:[A-Za-z0-9_-]+$").expect("token pattern is valid");
        if !shape.is_match(&self.telegram_token) {
            return Err(GuildbotError::Config(
                "TELEGRAM_BOT_TOKEN has an invalid format (expected '<bot id>:<secret>')".into(),
            ));
        }
        Ok(())
    }

    fn validate_webhook(&self) -> Result<(), GuildbotError> {
        if let Some(url) = &self.webhook_url {
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(GuildbotError::Config(
                    "WEBHOOK_URL must be an http(s) URL".into(),
                ));
            }
        } else if self.environment == Environment::Production {
            return Err(GuildbotError::Config(
                "WEBHOOK_URL environment variable is required in production".into(),
            ));
        }
        Ok(())
    }

    fn validate_server(&self) -> Result<(), GuildbotError> {
        if self.port == 0 {
            return Err(GuildbotError::Config(
                "PORT must be between 1 and 65535".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(GuildbotError::Config(format!(
                "LOG_LEVEL must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        Ok(())
    }

    /// Full URL Telegram should deliver updates to.
    pub fn webhook_endpoint(&self) -> Option<Url> {
        self.webhook_url.as_ref().map(|base| {
            let mut url = base.clone();
            let path = format!("{}/webhook", url.path().trim_end_matches('/'));
            url.set_path(&path);
            url
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, GuildbotError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(GuildbotError::Config(format!(
            "{} environment variable is required",
            name
        ))),
    }
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.is_empty())
}

/// Secrets are reported as set/not set, never echoed.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "config: environment={} host={} port={} bot_name={:?} log_level={} webhook_url={} telegram_token={} gemini_api_key={} gemini_model={}",
            self.environment.as_str(),
            self.host,
            self.port,
            self.bot_name,
            self.log_level,
            self.webhook_url
                .as_ref()
                .map_or("not set", |_| "set"),
            if self.telegram_token.is_empty() { "not set" } else { "set" },
            if self.gemini_api_key.is_empty() { "not set" } else { "set" },
            self.gemini_model,
        )
    }
}
