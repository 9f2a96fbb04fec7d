//! Shared text helpers.

/// Number of whitespace-separated words in a fragment.
///
/// A fragment made only of whitespace counts zero.
pub fn count_words(fragment: &str) -> usize {
    fragment.split_whitespace().count()
}

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_words_splits_on_any_whitespace() {
        assert_eq!(count_words("Hello "), 1);
        assert_eq!(count_words("one two\tthree\nfour"), 4);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn count_words_partial_tokens() {
        // Providers often split words mid-token; each piece still counts once.
        assert_eq!(count_words("stre"), 1);
        assert_eq!(count_words("aming, "), 1);
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        let s = "あのね"; // 3 bytes each
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }
}
