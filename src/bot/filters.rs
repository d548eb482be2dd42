//! Group-chat gating: decide whether an inbound message gets a reply.

/// Everything the gate needs to know about a message, extracted up front so
/// the decision stays a pure function.
pub struct MessageFacts<'a> {
    pub text: &'a str,
    pub is_private: bool,
    pub is_reply_to_bot: bool,
}

/// Words that pull the bot into a group conversation without an @-mention.
/// Substring match, like the trigger list always worked.
const TRIGGER_WORDS: &[&str] = &[
    "bot", "ai", "help", "assistant", "gemini", "hello", "hi", "hey",
    "question", "ask", "tell me", "what", "how", "why", "when", "where",
    "explain", "can you", "do you", "please", "thanks", "chat",
];

/// Private chats are always answered. In groups the bot only joins in when
/// mentioned, replied to, triggered by a keyword, or asked a question.
pub fn should_respond(facts: &MessageFacts<'_>, bot_username: &str) -> bool {
    if facts.is_private || facts.is_reply_to_bot {
        return true;
    }
    if mentions_bot(facts.text, bot_username) {
        return true;
    }
    let lower = facts.text.to_lowercase();
    if TRIGGER_WORDS.iter().any(|word| lower.contains(word)) {
        return true;
    }
    facts.text.trim_end().ends_with('?')
}

fn mentions_bot(text: &str, bot_username: &str) -> bool {
    !bot_username.is_empty()
        && text
            .to_lowercase()
            .contains(&format!("@{}", bot_username.to_lowercase()))
}
