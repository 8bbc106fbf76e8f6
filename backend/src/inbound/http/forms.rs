//! Form payloads and their validation.
//!
//! Validation failures re-render the submitted form with field errors; they
//! never surface as error responses.

use serde::Deserialize;

use crate::domain::{Language, LanguageId, Snippet, SnippetContent};

/// A single field validation failure shown on the re-rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Payload for the add and edit snippet forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnippetForm {
    /// Selected language slug.
    #[serde(default)]
    pub language: String,
    /// Raw snippet text.
    #[serde(default)]
    pub content: String,
    /// Checkbox: present when ticked, absent otherwise.
    #[serde(default)]
    pub public: Option<String>,
}

impl SnippetForm {
    /// Pre-populate the form from an existing snippet for the edit flow.
    pub fn from_snippet(snippet: &Snippet, language: &Language) -> Self {
        Self {
            language: language.slug().as_ref().to_owned(),
            content: snippet.content().as_ref().to_owned(),
            public: snippet.is_public().then(|| "on".to_owned()),
        }
    }

    /// Whether the public checkbox was ticked.
    pub fn is_public(&self) -> bool {
        self.public.is_some()
    }

    /// Validate the payload against the known languages.
    ///
    /// Collects every field failure so the re-rendered form can show them
    /// all at once.
    pub fn validate(
        &self,
        languages: &[Language],
    ) -> Result<(LanguageId, SnippetContent), Vec<FieldError>> {
        let mut errors = Vec::new();

        let language = languages
            .iter()
            .find(|l| l.slug().as_ref() == self.language);
        if language.is_none() {
            errors.push(FieldError {
                field: "language",
                message: "choose a known language".to_owned(),
            });
        }

        let content = match SnippetContent::new(self.content.clone()) {
            Ok(content) => Some(content),
            Err(err) => {
                errors.push(FieldError {
                    field: "content",
                    message: err.to_string(),
                });
                None
            }
        };

        match (language, content) {
            (Some(language), Some(content)) if errors.is_empty() => {
                Ok((*language.id(), content))
            }
            _ => Err(errors),
        }
    }
}

/// Payload for the login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{LanguageId, Slug};
    use rstest::rstest;

    fn language(name: &str, slug: &str) -> Language {
        Language::new(
            LanguageId::random(),
            name,
            Slug::new(slug).expect("valid slug"),
        )
        .expect("valid language")
    }

    fn form(language: &str, content: &str, public: bool) -> SnippetForm {
        SnippetForm {
            language: language.to_owned(),
            content: content.to_owned(),
            public: public.then(|| "on".to_owned()),
        }
    }

    #[test]
    fn valid_form_resolves_language_and_content() {
        let rust = language("Rust", "rust");
        let (language_id, content) = form("rust", "fn main() {}", true)
            .validate(std::slice::from_ref(&rust))
            .expect("valid form");

        assert_eq!(&language_id, rust.id());
        assert_eq!(content.as_ref(), "fn main() {}");
    }

    #[rstest]
    #[case("haskell", "fn main() {}", &["language"])]
    #[case("rust", "   ", &["content"])]
    #[case("", "", &["language", "content"])]
    fn invalid_forms_collect_field_errors(
        #[case] language_slug: &str,
        #[case] content: &str,
        #[case] expected_fields: &[&str],
    ) {
        let rust = language("Rust", "rust");
        let errors = form(language_slug, content, false)
            .validate(std::slice::from_ref(&rust))
            .expect_err("invalid form must fail");

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, expected_fields);
    }

    #[test]
    fn from_snippet_prefills_the_edit_form() {
        let rust = language("Rust", "rust");
        let snippet = Snippet::create(
            crate::domain::UserId::random(),
            *rust.id(),
            SnippetContent::new("fn main() {}").expect("valid content"),
            true,
        );

        let form = SnippetForm::from_snippet(&snippet, &rust);

        assert_eq!(form.language, "rust");
        assert_eq!(form.content, "fn main() {}");
        assert!(form.is_public());
    }
}
