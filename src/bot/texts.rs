//! Canned replies and the prompt template. Markdown here is converted to
//! Telegram HTML on send.

pub fn start_private(bot_username: &str, bot_name: &str) -> String {
    format!(
        "🤖 Hi! I'm @{bot_username} - your {bot_name}!\n\n\
         💬 You can ask me programming questions, get coding help, or discuss technical topics.\n\
         🧠 I'm powered by Google Gemini and specialize in training and education.\n\n\
         Type /help for more information or just start chatting with me!"
    )
}

pub fn start_group(bot_username: &str, bot_name: &str) -> String {
    format!(
        "🤖 Hello everyone! I'm @{bot_username} - your {bot_name}!\n\n\
         💬 Just mention me (@{bot_username}) or reply to my messages to get AI-powered responses.\n\
         🧠 I can help with training questions, programming discussions, and technical topics.\n\n\
         Type /help for more information!"
    )
}

pub fn help_private(bot_username: &str) -> String {
    format!(
        "🤖 **@{bot_username} - Private Chat Help**\n\n\
         **How to use me:**\n\
         - Just start chatting! I respond to every message in private chats.\n\
         - Ask programming questions, get coding help, discuss technical topics.\n\n\
         **Commands:**\n\
         - /start - Welcome message and introduction\n\
         - /help - Show this help message\n\
         - /status - Check bot and AI service status\n\n\
         **Example questions:**\n\
         - \"How do I create a function in Rust?\"\n\
         - \"What is machine learning?\"\n\
         - \"Help me debug this code\""
    )
}

pub fn help_group(bot_username: &str) -> String {
    format!(
        "🤖 **@{bot_username} - Group Chat Help**\n\n\
         **How to use me:**\n\
         - Mention me (@{bot_username}) in your message\n\
         - Reply to any of my previous messages\n\
         - Use trigger words: hi, help, what, how, please, ...\n\
         - Ask questions ending with ?\n\n\
         **Commands:**\n\
         - /start - Welcome message and introduction\n\
         - /help - Show this help message\n\
         - /status - Check bot and AI service status\n\n\
         **Note:** Perfect for collaborative learning and training discussions!"
    )
}

pub fn status(
    bot_username: &str,
    gemini_connected: bool,
    model: &str,
    environment: &str,
    is_group: bool,
) -> String {
    let gemini_line = if gemini_connected {
        "✅ **Gemini AI:** Connected"
    } else {
        "❌ **Gemini AI:** Disconnected"
    };
    let chat_type = if is_group { "Group Chat" } else { "Private Chat" };
    format!(
        "🤖 **@{bot_username} Status**\n\n\
         ✅ **Telegram Bot:** Online\n\
         {gemini_line}\n\
         🧠 **Model:** {model}\n\
         🏠 **Environment:** {environment}\n\
         📊 **Chat Type:** {chat_type}"
    )
}

/// The full prompt for one message: persona instructions, then the user's
/// sanitized text.
pub fn build_prompt(bot_username: &str, user_name: &str, chat_name: &str, message: &str) -> String {
    format!(
        "You are @{bot_username}, a Gemini AI training assistant in a Telegram group chat. \
         You specialize in programming training, coding assistance, and technical education. \
         Provide helpful, accurate, and engaging responses focused on learning and development. \
         Keep responses conversational and appropriate for group training settings. \
         Be educational, encouraging, and provide practical examples when possible. \
         The user's name is {user_name} and this is the chat '{chat_name}'.\n\n\
         User message: {message}"
    )
}
