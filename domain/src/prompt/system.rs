//! System prompt construction

use crate::dialect::chat_to_provider;

/// Placeholder replaced with the bot's own user id
pub const BOT_USER_ID_PLACEHOLDER: &str = "{bot_user_id}";

/// Default system prompt template
pub const DEFAULT_SYSTEM_TEXT: &str = "You are a bot in a chat workspace. \
You are designed to be helpful, polite, and answer concisely. \
Your user id in this workspace is <@{bot_user_id}>. \
Format bold text as *bold*, italic text as _italic_ and strikethrough as ~strike~.";

/// Fill in the system prompt template.
///
/// When `translate_markdown` is set, the formatting hints written in chat
/// markup are converted so the provider sees its own dialect.
pub fn build_system_text(template: &str, bot_user_id: &str, translate_markdown: bool) -> String {
    let system_text = template.replace(BOT_USER_ID_PLACEHOLDER, bot_user_id);
    if translate_markdown {
        chat_to_provider(&system_text)
    } else {
        system_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_bot_user_id() {
        let text = build_system_text("I am <@{bot_user_id}>.", "U42", false);
        assert_eq!(text, "I am <@U42>.");
    }

    #[test]
    fn test_translates_format_hints() {
        let text = build_system_text("Use *bold* and _italic_.", "U42", true);
        assert_eq!(text, "Use **bold** and *italic*.");
    }

    #[test]
    fn test_default_template_mentions_bot() {
        let text = build_system_text(DEFAULT_SYSTEM_TEXT, "U42", false);
        assert!(text.contains("<@U42>"));
        assert!(!text.contains(BOT_USER_ID_PLACEHOLDER));
    }
}
