//! Telegram dispatch: commands, group gating, and the relay to Gemini.

pub mod filters;
mod texts;

use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use regex::Regex;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ParseMode, UserId};
use teloxide::update_listeners::{Polling, webhooks};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::gateway::{self, GatewayState};
use crate::gemini::GeminiClient;
use crate::utils::{sanitize_message, split_message};
use filters::MessageFacts;

/// Telegram's hard limit on message length.
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

struct BotState {
    config: Config,
    gemini: GeminiClient,
    username: String,
    user_id: UserId,
}

/// Connect to Telegram and relay messages until shutdown. With a webhook
/// URL configured, one axum server carries both the Telegram webhook and
/// the liveness routes; otherwise the bot long-polls and the liveness
/// routes get their own server.
pub async fn run(config: Config) -> Result<()> {
    let bot = Bot::new(&config.telegram_token);
    let me = bot
        .get_me()
        .await
        .context("failed to reach the Telegram API")?;
    info!("authorized as @{}", me.username());

    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    let state = Arc::new(BotState {
        username: me.username().to_string(),
        user_id: me.user.id,
        gemini,
        config,
    });

    let handler = {
        let state = state.clone();
        Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let state = state.clone();
            async move {
                handle_message(&bot, &state, &msg).await;
                Ok::<(), anyhow::Error>(())
            }
        })
    };

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .enable_ctrlc_handler()
        .build();

    let gateway_state = GatewayState::new(state.config.environment.as_str());

    if let Some(endpoint) = state.config.webhook_endpoint() {
        let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port)
            .parse()
            .context("HOST/PORT do not form a bindable socket address")?;
        let (listener, stop_flag, bot_router) =
            webhooks::axum_to_router(bot.clone(), webhooks::Options::new(addr, endpoint.clone()))
                .await
                .context("failed to register the Telegram webhook")?;
        let app = gateway::router(gateway_state).merge(bot_router);
        gateway::serve_with_shutdown(&state.config.host, state.config.port, app, stop_flag).await?;
        info!("webhook registered at {}", endpoint);

        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("update listener error"),
            )
            .await;
    } else {
        gateway::start(&state.config.host, state.config.port, gateway_state).await?;
        info!("webhook URL not set, long polling for updates");

        let listener = Polling::builder(bot.clone()).drop_pending_updates().build();
        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("update listener error"),
            )
            .await;
    }

    info!("bot stopped");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Help,
    Status,
}

/// Recognize `/cmd` and `/cmd@this_bot`. Commands addressed to another bot
/// resolve to `None` and are dropped by the caller.
fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let (name, target) = match name.split_once('@') {
        Some((n, t)) => (n, Some(t)),
        None => (name, None),
    };
    if target.is_some_and(|t| !t.eq_ignore_ascii_case(bot_username)) {
        return None;
    }
    match name {
        "start" => Some(Command::Start),
        "help" => Some(Command::Help),
        "status" => Some(Command::Status),
        _ => None,
    }
}

async fn handle_message(bot: &Bot, state: &BotState, msg: &Message) {
    let Some(text) = msg.text() else { return };

    if let Some(command) = parse_command(text, &state.username) {
        handle_command(bot, state, msg, command).await;
        return;
    }
    if text.starts_with('/') {
        // Unknown or foreign command; not ours to answer.
        return;
    }

    let facts = MessageFacts {
        text,
        is_private: msg.chat.is_private(),
        is_reply_to_bot: msg
            .reply_to_message()
            .and_then(|reply| reply.from())
            .is_some_and(|user| user.id == state.user_id),
    };
    if !filters::should_respond(&facts, &state.username) {
        debug!("message in chat {} not addressed to the bot, skipping", msg.chat.id);
        return;
    }

    let prompt_text = sanitize_message(text);
    if prompt_text.is_empty() {
        return;
    }

    // Best-effort typing indicator while the model works.
    if let Err(e) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
        debug!("failed to send typing action: {}", e);
    }

    let user_name = msg
        .from()
        .map_or_else(|| "User".to_string(), |user| user.first_name.clone());
    let chat_name = msg.chat.title().unwrap_or("Private Chat").to_string();
    info!("generating reply for {} in '{}'", user_name, chat_name);

    let prompt = texts::build_prompt(&state.username, &user_name, &chat_name, &prompt_text);
    match state.gemini.generate(&prompt).await {
        Ok(reply) => send_reply(bot, msg.chat.id, &reply).await,
        Err(e) => {
            error!("failed to generate reply: {}", e);
            send_reply(bot, msg.chat.id, e.user_message()).await;
        }
    }
}

async fn handle_command(bot: &Bot, state: &BotState, msg: &Message, command: Command) {
    let is_group = !msg.chat.is_private();
    let reply = match command {
        Command::Start => {
            if is_group {
                texts::start_group(&state.username, &state.config.bot_name)
            } else {
                texts::start_private(&state.username, &state.config.bot_name)
            }
        }
        Command::Help => {
            if is_group {
                texts::help_group(&state.username)
            } else {
                texts::help_private(&state.username)
            }
        }
        Command::Status => {
            let connected = state.gemini.probe().await;
            texts::status(
                &state.username,
                connected,
                state.gemini.model(),
                state.config.environment.as_str(),
                is_group,
            )
        }
    };
    send_reply(bot, msg.chat.id, &reply).await;
}

/// Send a reply, split to Telegram's length limit, markdown converted to
/// Telegram HTML. Send failures are logged, never propagated.
async fn send_reply(bot: &Bot, chat_id: ChatId, text: &str) {
    for chunk in split_message(text, TELEGRAM_MESSAGE_LIMIT) {
        let html = markdown_to_telegram_html(&chunk);
        if let Err(e) = bot
            .send_message(chat_id, html)
            .parse_mode(ParseMode::Html)
            .await
        {
            error!("failed to send message to chat {}: {}", chat_id, e);
            return;
        }
    }
}

static RE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static RE_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("italic pattern is valid"));
static RE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code pattern is valid"));
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

/// Minimal markdown to Telegram HTML conversion: escape first, then links,
/// bold, italic, inline code.
fn markdown_to_telegram_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut html = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    html = RE_LINK
        .replace_all(&html, r#"<a href="$2">$1</a>"#)
        .to_string();
    html = RE_BOLD.replace_all(&html, "<b>$1</b>").to_string();
    html = RE_ITALIC.replace_all(&html, "<i>$1</i>").to_string();
    html = RE_CODE.replace_all(&html, "<code>$1</code>").to_string();

    html
}

#[cfg(test)]
mod tests {
    use super::{Command, markdown_to_telegram_html, parse_command};

    #[test]
    fn parses_bare_and_addressed_commands() {
        assert_eq!(parse_command("/start", "guildbot"), Some(Command::Start));
        assert_eq!(parse_command("/help extra words", "guildbot"), Some(Command::Help));
        assert_eq!(
            parse_command("/status@GuildBot", "guildbot"),
            Some(Command::Status)
        );
    }

    #[test]
    fn ignores_commands_for_other_bots() {
        assert_eq!(parse_command("/start@other_bot", "guildbot"), None);
    }

    #[test]
    fn ignores_unknown_commands_and_plain_text() {
        assert_eq!(parse_command("/frobnicate", "guildbot"), None);
        assert_eq!(parse_command("start", "guildbot"), None);
    }

    #[test]
    fn markdown_converts_and_escapes() {
        assert_eq!(
            markdown_to_telegram_html("use **bold** and `Vec<u8>`"),
            "use <b>bold</b> and <code>Vec&lt;u8&gt;</code>"
        );
        assert_eq!(
            markdown_to_telegram_html("[docs](https://example.com)"),
            r#"<a href="https://example.com">docs</a>"#
        );
    }

    #[test]
    fn markdown_leaves_plain_text_alone() {
        assert_eq!(markdown_to_telegram_html("just words"), "just words");
        assert_eq!(markdown_to_telegram_html(""), "");
    }
}
