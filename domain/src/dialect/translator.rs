//! Platform ⇄ provider text transforms.

use super::markup::{chat_to_provider, provider_to_chat};
use regex::Regex;
use std::sync::LazyLock;

/// Languages whose fenced-code opening tag is stripped, in application order.
///
/// The chat platform does not highlight code, so a tag would show up as
/// literal text on the first line of the block.
pub const FENCE_LANGUAGES: &[&str] = &[
    "rust",
    "ruby",
    "scala",
    "kotlin",
    "java",
    "go",
    "swift",
    "objectivec",
    "c",
    "c++",
    "cpp",
    "csharp",
    "matlab",
    "json",
    "latex",
    "bash",
    "zsh",
    "sh",
    "sql",
    "php",
    "perl",
    "javascript",
    "typescript",
    "python",
];

/// Ordered substitution table applied by [`to_external`].
///
/// Later entries see the output of earlier ones.
static ARTIFACTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    let mut table = vec![
        // Leading newlines
        (Regex::new(r"^\n+").expect("valid pattern"), ""),
        // Echoed addressee mention, e.g. "<@U0123>: "
        (Regex::new(r"^<@U.*?>\s?:\s?").expect("valid pattern"), ""),
    ];
    for language in FENCE_LANGUAGES {
        let pattern = format!(r"(?i)```\s*{}\n", regex::escape(language));
        table.push((Regex::new(&pattern).expect("valid pattern"), "```\n"));
    }
    table
});

/// Resolve the HTML entities the chat platform substitutes for reserved
/// characters.
pub fn unescape_entities(content: &str) -> String {
    content
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Platform text → provider text.
///
/// Absent input passes through as absent.
pub fn to_internal(content: Option<&str>, translate_markdown: bool) -> Option<String> {
    let content = unescape_entities(content?);
    if translate_markdown {
        Some(chat_to_provider(&content))
    } else {
        Some(content)
    }
}

/// Provider text → platform text.
pub fn to_external(content: &str, translate_markdown: bool) -> String {
    let mut content = content.to_string();
    for (pattern, replacement) in ARTIFACTS.iter() {
        content = pattern.replace_all(&content, *replacement).into_owned();
    }

    if translate_markdown {
        provider_to_chat(&content)
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_internal_unescapes_entities() {
        assert_eq!(
            to_internal(Some("if a &lt; b &amp;&amp; b &gt; c"), false).as_deref(),
            Some("if a < b && b > c")
        );
    }

    #[test]
    fn test_to_internal_absent_passes_through() {
        assert_eq!(to_internal(None, true), None);
        assert_eq!(to_internal(None, false), None);
    }

    #[test]
    fn test_to_internal_is_idempotent_once_entities_resolved() {
        let once = to_internal(Some("x &lt; y"), false).unwrap();
        let twice = to_internal(Some(&once), false).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_to_internal_translates_markup() {
        assert_eq!(
            to_internal(Some("*bold* &amp; _it_"), true).as_deref(),
            Some("**bold** & *it*")
        );
        assert_eq!(
            to_internal(Some("*bold* &amp; _it_"), false).as_deref(),
            Some("*bold* & _it_")
        );
    }

    #[test]
    fn test_to_external_strips_leading_newlines_and_mention() {
        assert_eq!(to_external("\n\nHello", false), "Hello");
        assert_eq!(to_external("<@U12345>: Hello", false), "Hello");
        assert_eq!(to_external("<@U12345> : Hello", false), "Hello");
        assert_eq!(to_external("\n<@U12345>:Hello", false), "Hello");
    }

    #[test]
    fn test_to_external_keeps_mid_text_mentions() {
        assert_eq!(
            to_external("ask <@U999>: later", false),
            "ask <@U999>: later"
        );
    }

    #[test]
    fn test_to_external_strips_every_fence_language() {
        for language in FENCE_LANGUAGES {
            for variant in [
                language.to_string(),
                language.to_uppercase(),
                capitalize(language),
            ] {
                let input = format!("Here:\n```{}\nbody\n```", variant);
                let output = to_external(&input, false);
                assert_eq!(output, "Here:\n```\nbody\n```", "language {}", variant);
            }
        }
    }

    #[test]
    fn test_to_external_leaves_unknown_fence_tag() {
        let input = "```haskell\nmain = pure ()\n```";
        assert_eq!(to_external(input, false), input);
    }

    #[test]
    fn test_to_external_fence_with_space() {
        assert_eq!(
            to_external("``` Python\nprint(1)\n```", false),
            "```\nprint(1)\n```"
        );
    }

    #[test]
    fn test_to_external_translates_markdown() {
        assert_eq!(
            to_external("\n**Answer**: use *this*", true),
            "*Answer*: use _this_"
        );
        assert_eq!(
            to_external("\n**Answer**: use *this*", false),
            "**Answer**: use *this*"
        );
    }

    #[test]
    fn test_to_external_plain_text_is_identity() {
        let input = "Nothing to strip here.";
        assert_eq!(to_external(input, false), input);
    }

    fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}
