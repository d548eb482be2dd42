use reqwest::Response;
use serde_json::Value;
use tracing::{error, warn};

use crate::errors::GuildbotError;

/// Map an HTTP response onto the typed error hierarchy. Returns the parsed
/// JSON body on success.
pub(super) async fn check_response(resp: Response) -> Result<Value, GuildbotError> {
    let status = resp.status();
    if !status.is_success() {
        let retry_after = resp
            .headers()
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok());
        let body = resp
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());

        return Err(match status.as_u16() {
            429 => {
                warn!("Gemini rate limit hit (retry-after: {:?})", retry_after);
                GuildbotError::RateLimit { retry_after }
            }
            401 | 403 => {
                warn!("Gemini authentication error ({}): {}", status, body);
                GuildbotError::Auth("API key rejected by Gemini".to_string())
            }
            code => parse_api_error(code, &body),
        });
    }

    let body: Value = resp.json().await?;

    // Some failures arrive as an `error` object in a 200 body.
    if let Some(err) = body.get("error") {
        return Err(api_error_from_value(status.as_u16(), err));
    }

    Ok(body)
}

/// Extract Gemini's `{code, status, message}` error body when present,
/// falling back to the raw text.
fn parse_api_error(status: u16, body: &str) -> GuildbotError {
    if let Ok(json) = serde_json::from_str::<Value>(body)
        && let Some(err) = json.get("error")
    {
        return api_error_from_value(status, err);
    }
    error!("Gemini API error ({}): {}", status, body);
    GuildbotError::Api {
        status,
        message: body.to_string(),
    }
}

fn api_error_from_value(fallback_status: u16, err: &Value) -> GuildbotError {
    let status = err
        .get("code")
        .and_then(Value::as_u64)
        .and_then(|c| u16::try_from(c).ok())
        .unwrap_or(fallback_status);
    let kind = err.get("status").and_then(Value::as_str).unwrap_or("UNKNOWN");
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    error!("Gemini API error ({} {}): {}", status, kind, message);
    GuildbotError::Api {
        status,
        message: format!("{}: {}", kind, message),
    }
}
