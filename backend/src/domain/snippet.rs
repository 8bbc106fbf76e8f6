//! Snippet aggregate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::language::LanguageId;
use super::user::UserId;

/// Maximum allowed snippet content length, in characters.
pub const CONTENT_MAX: usize = 65_536;

/// Validation errors returned by the snippet constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetValidationError {
    EmptyContent,
    ContentTooLong { max: usize },
}

impl fmt::Display for SnippetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "snippet content must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "snippet content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for SnippetValidationError {}

/// Stable snippet identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(Uuid);

impl SnippetId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`SnippetId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SnippetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Raw snippet text.
///
/// Content is stored verbatim (code is whitespace sensitive); the constructor
/// only rejects blank and oversized input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SnippetContent(String);

impl SnippetContent {
    /// Validate and construct [`SnippetContent`] from owned input.
    pub fn new(content: impl Into<String>) -> Result<Self, SnippetValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SnippetValidationError::EmptyContent);
        }
        if content.chars().count() > CONTENT_MAX {
            return Err(SnippetValidationError::ContentTooLong { max: CONTENT_MAX });
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for SnippetContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SnippetContent> for String {
    fn from(value: SnippetContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for SnippetContent {
    type Error = SnippetValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A stored piece of text content with an owner, language tag, and
/// visibility flag.
///
/// ## Invariants
/// - Exactly one owner; only the owner may mutate or delete the snippet.
/// - Visibility is governed solely by the `public` flag plus viewer identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    id: SnippetId,
    owner: UserId,
    language: LanguageId,
    content: SnippetContent,
    public: bool,
    created_at: DateTime<Utc>,
}

impl Snippet {
    /// Rehydrate a snippet from already-validated parts.
    pub fn new(
        id: SnippetId,
        owner: UserId,
        language: LanguageId,
        content: SnippetContent,
        public: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            language,
            content,
            public,
            created_at,
        }
    }

    /// Create a fresh snippet for `owner`, stamped with the current time.
    pub fn create(
        owner: UserId,
        language: LanguageId,
        content: SnippetContent,
        public: bool,
    ) -> Self {
        Self::new(
            SnippetId::random(),
            owner,
            language,
            content,
            public,
            Utc::now(),
        )
    }

    /// Apply an owner-submitted edit. Ownership and creation time never change.
    pub fn apply_edit(&mut self, language: LanguageId, content: SnippetContent, public: bool) {
        self.language = language;
        self.content = content;
        self.public = public;
    }

    /// Stable snippet identifier.
    pub fn id(&self) -> &SnippetId {
        &self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Language tag.
    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    /// Raw text content.
    pub fn content(&self) -> &SnippetContent {
        &self.content
    }

    /// Whether the snippet is visible to everyone.
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` owns this snippet.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn content(text: &str) -> SnippetContent {
        SnippetContent::new(text).expect("valid content")
    }

    #[test]
    fn create_sets_owner_and_identity() {
        let owner = UserId::random();
        let language = LanguageId::random();
        let snippet = Snippet::create(owner, language, content("fn main() {}"), true);

        assert!(snippet.is_owned_by(&owner));
        assert_eq!(snippet.language(), &language);
        assert!(snippet.is_public());
    }

    #[test]
    fn apply_edit_preserves_owner_and_creation_time() {
        let owner = UserId::random();
        let mut snippet =
            Snippet::create(owner, LanguageId::random(), content("print(1)"), false);
        let created_at = snippet.created_at();

        let new_language = LanguageId::random();
        snippet.apply_edit(new_language, content("print(2)"), true);

        assert!(snippet.is_owned_by(&owner));
        assert_eq!(snippet.created_at(), created_at);
        assert_eq!(snippet.language(), &new_language);
        assert_eq!(snippet.content().as_ref(), "print(2)");
        assert!(snippet.is_public());
    }

    #[rstest]
    #[case("")]
    #[case("  \n\t ")]
    fn rejects_blank_content(#[case] text: &str) {
        let err = SnippetContent::new(text).expect_err("blank content must fail");
        assert_eq!(err, SnippetValidationError::EmptyContent);
    }

    #[test]
    fn rejects_oversized_content() {
        let text = "x".repeat(CONTENT_MAX + 1);
        let err = SnippetContent::new(text).expect_err("oversized content must fail");
        assert_eq!(err, SnippetValidationError::ContentTooLong { max: CONTENT_MAX });
    }

    #[test]
    fn content_preserves_whitespace() {
        let text = "fn main() {\n    println!(\"hi\");\n}\n";
        assert_eq!(content(text).as_ref(), text);
    }
}
