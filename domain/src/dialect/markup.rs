//! Markup conversion between chat-platform markup and Markdown.
//!
//! Code spans (fenced blocks and inline code) are never rewritten. A
//! delimiter pair only matches when the enclosed text neither starts nor ends
//! with whitespace and spans a single line.

use regex::Regex;
use std::sync::LazyLock;

static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.+?```|`[^`\n]+?`").expect("valid code span pattern"));

static CHAT_BOLD: LazyLock<Regex> = LazyLock::new(|| delimited(r"\*", "*"));
static CHAT_ITALIC: LazyLock<Regex> = LazyLock::new(|| delimited("_", "_"));
static CHAT_STRIKE: LazyLock<Regex> = LazyLock::new(|| delimited("~", "~"));

static MD_BOLD_ITALIC: LazyLock<Regex> = LazyLock::new(|| delimited(r"\*\*\*", "*"));
static MD_ITALIC: LazyLock<Regex> = LazyLock::new(|| delimited(r"\*", "*"));
static MD_BOLD: LazyLock<Regex> = LazyLock::new(|| delimited(r"\*\*", "*"));
static MD_BOLD_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| delimited("__", "_"));
static MD_STRIKE: LazyLock<Regex> = LazyLock::new(|| delimited("~~", "~"));

/// Builds `<delim>(text)<delim>` where `text` excludes `inner` and newlines
/// and has no leading or trailing whitespace.
fn delimited(delim: &str, inner: &str) -> Regex {
    let inner = regex::escape(inner);
    let pattern = format!(
        r"{delim}([^{inner}\s](?:[^{inner}\n]*[^{inner}\s])?){delim}",
        delim = delim,
        inner = inner
    );
    Regex::new(&pattern).expect("valid delimiter pattern")
}

/// Apply `convert` to every stretch of text outside code spans.
fn map_prose(content: &str, convert: impl Fn(&str) -> String) -> String {
    let mut result = String::with_capacity(content.len());
    let mut last = 0;
    for span in CODE_SPAN.find_iter(content) {
        result.push_str(&convert(&content[last..span.start()]));
        result.push_str(span.as_str());
        last = span.end();
    }
    result.push_str(&convert(&content[last..]));
    result
}

/// Replace matches of `re` whose neighbours are not in `excluded`.
///
/// A rejected match is retried one character later, so a pair nested in
/// longer delimiter runs is skipped rather than partially consumed.
fn replace_unflanked(text: &str, re: &Regex, excluded: &[char], replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = 0;
    while search <= text.len() {
        let Some(caps) = re.captures_at(text, search) else {
            break;
        };
        let whole = caps.get(0).expect("group 0 always present");
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();
        let flanked = before.is_some_and(|c| excluded.contains(&c))
            || after.is_some_and(|c| excluded.contains(&c));
        if flanked {
            search = whole.start() + text[whole.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        result.push_str(&text[copied..whole.start()]);
        caps.expand(replacement, &mut result);
        copied = whole.end();
        search = whole.end();
    }
    result.push_str(&text[copied..]);
    result
}

/// Chat-platform markup → Markdown
pub fn chat_to_provider(content: &str) -> String {
    map_prose(content, |part| {
        let part = CHAT_BOLD.replace_all(part, "**${1}**");
        let part = CHAT_ITALIC.replace_all(&part, "*${1}*");
        CHAT_STRIKE.replace_all(&part, "~~${1}~~").into_owned()
    })
}

/// Markdown → chat-platform markup
pub fn provider_to_chat(content: &str) -> String {
    map_prose(content, |part| {
        let part = MD_BOLD_ITALIC.replace_all(part, "_*${1}*_");
        let part = replace_unflanked(&part, &MD_ITALIC, &['*', '_'], "_${1}_");
        let part = MD_BOLD.replace_all(&part, "*${1}*");
        let part = MD_BOLD_UNDERSCORE.replace_all(&part, "*${1}*");
        MD_STRIKE.replace_all(&part, "~${1}~").into_owned()
    })
}
