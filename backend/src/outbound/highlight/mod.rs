//! HTML syntax-highlighting adapter.
//!
//! Implements the [`SyntaxHighlighter`] port by resolving the language name
//! against a registry of known languages and emitting an escaped, classed
//! `<pre><code>` block. A stylesheet keyed on the emitted classes provides
//! the fixed visual theme; unknown languages fall back to the plain-text
//! rendering.

use crate::domain::ports::SyntaxHighlighter;
use crate::html::escape;

/// Fixed visual theme applied to every rendering.
const THEME: &str = "monokai";

/// Class token used when the language cannot be resolved.
const PLAIN_TEXT: &str = "plaintext";

/// Language names the registry resolves, paired with their class token.
/// Matching is case-insensitive on the name.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("bash", "bash"),
    ("c", "c"),
    ("c#", "csharp"),
    ("c++", "cpp"),
    ("css", "css"),
    ("go", "go"),
    ("html", "html"),
    ("java", "java"),
    ("javascript", "javascript"),
    ("python", "python"),
    ("ruby", "ruby"),
    ("rust", "rust"),
    ("sql", "sql"),
    ("typescript", "typescript"),
];

/// Stateless highlighter emitting theme-classed HTML.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassedHighlighter;

impl ClassedHighlighter {
    fn resolve(language_name: &str) -> &'static str {
        let wanted = language_name.trim().to_lowercase();
        KNOWN_LANGUAGES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map_or(PLAIN_TEXT, |&(_, token)| token)
    }
}

impl SyntaxHighlighter for ClassedHighlighter {
    fn render(&self, content: &str, language_name: &str) -> String {
        let token = Self::resolve(language_name);
        format!(
            "<div class=\"highlight highlight-{THEME}\"><pre><code class=\"language-{token}\">{}</code></pre></div>",
            escape(content)
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Python", "language-python")]
    #[case("rust", "language-rust")]
    #[case("  JavaScript  ", "language-javascript")]
    #[case("C++", "language-cpp")]
    fn resolves_known_languages(#[case] name: &str, #[case] expected_class: &str) {
        let html = ClassedHighlighter.render("print(1)", name);
        assert!(html.contains(expected_class), "missing class in {html}");
    }

    #[rstest]
    #[case("Befunge-93")]
    #[case("")]
    #[case("no such language")]
    fn unknown_languages_fall_back_to_plain_text(#[case] name: &str) {
        let html = ClassedHighlighter.render("anything", name);
        assert!(html.contains("language-plaintext"), "missing fallback in {html}");
    }

    #[test]
    fn content_is_escaped() {
        let html = ClassedHighlighter.render("<b>&</b>", "rust");
        assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn rendering_carries_the_fixed_theme() {
        let html = ClassedHighlighter.render("x", "rust");
        assert!(html.contains("highlight-monokai"));
    }
}
