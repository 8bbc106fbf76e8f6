//! HTML text escaping.
//!
//! Leaf helper shared by page rendering and the highlight adapter: replaces
//! the characters that are unsafe in HTML text and double-quoted attribute
//! values with their named character references.

/// Escape a string for safe inclusion in HTML text and attribute values.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their named references.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn escapes_quote_characters() {
        assert_eq!(escape("\"x'"), "&quot;x&#x27;");
    }

    #[test]
    fn leaves_plain_text_unchanged() {
        assert_eq!(escape("plain text 123"), "plain text 123");
    }
}
