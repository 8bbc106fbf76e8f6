//! Programming-language tag model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::is_valid_slug;

/// Validation errors returned by the language constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageValidationError {
    EmptyName,
    InvalidSlug,
}

impl fmt::Display for LanguageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "language name must not be empty"),
            Self::InvalidSlug => write!(
                f,
                "language slug may only contain lowercase letters, digits, or hyphens",
            ),
        }
    }
}

impl std::error::Error for LanguageValidationError {}

/// Stable language identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(Uuid);

impl LanguageId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`LanguageId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL-safe unique identifier for a language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`] from owned input.
    pub fn new(slug: impl Into<String>) -> Result<Self, LanguageValidationError> {
        let slug = slug.into();
        if !is_valid_slug(&slug) {
            return Err(LanguageValidationError::InvalidSlug);
        }
        Ok(Self(slug))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = LanguageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A named programming language snippets can be tagged with.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `slug` satisfies the [`Slug`] rules and is unique store-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    id: LanguageId,
    name: String,
    slug: Slug,
}

impl Language {
    /// Build a new [`Language`], validating the display name.
    pub fn new(
        id: LanguageId,
        name: impl Into<String>,
        slug: Slug,
    ) -> Result<Self, LanguageValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LanguageValidationError::EmptyName);
        }
        Ok(Self { id, name, slug })
    }

    /// Stable language identifier.
    pub fn id(&self) -> &LanguageId {
        &self.id
    }

    /// Human-readable language name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// URL-safe identifier.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}
