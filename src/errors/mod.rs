use thiserror::Error;

/// Typed error hierarchy for guildbot.
///
/// Use at module boundaries (the Gemini client, config validation).
/// Internal/leaf functions can continue using `anyhow::Result` — the
/// `Internal` variant allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum GuildbotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limit exceeded")]
    RateLimit { retry_after: Option<u64> },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GuildbotError {
    /// Generic reply shown in chat when an operation fails. The real cause
    /// only goes to the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Auth(_) => {
                "🔒 Authorization error. Please contact the administrator."
            }
            Self::RateLimit { .. } => {
                "🚦 Rate limit exceeded. Please wait a moment and try again."
            }
            Self::Http(_) => {
                "🌐 Network connection issue. Please check your connection and try again."
            }
            Self::EmptyResponse => {
                "🤔 I'm having trouble generating a response right now. Please try again!"
            }
            Self::Api { .. } | Self::Internal(_) => {
                "⚠️ I'm experiencing technical difficulties. Please try again in a moment."
            }
        }
    }
}

#[cfg(test)]
mod tests;
