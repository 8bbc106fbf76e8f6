//! Port abstraction for language persistence adapters and their errors.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{Language, LanguageId, Slug};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by language repository adapters.
    pub enum LanguagePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "language repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "language repository query failed: {message}",
    }
}

#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// All known languages, ordered by name.
    async fn list_all(&self) -> Result<Vec<Language>, LanguagePersistenceError>;

    /// Fetch a language by identifier.
    async fn find_by_id(&self, id: &LanguageId)
        -> Result<Option<Language>, LanguagePersistenceError>;

    /// Fetch a language by unique slug.
    async fn find_by_slug(&self, slug: &Slug)
        -> Result<Option<Language>, LanguagePersistenceError>;
}

/// In-memory language repository used by handler tests and database-less runs.
#[derive(Debug, Default)]
pub struct MemoryLanguageRepository {
    languages: Mutex<Vec<Language>>,
}

impl MemoryLanguageRepository {
    /// Build a repository pre-populated with `languages`.
    pub fn with_languages(languages: Vec<Language>) -> Self {
        Self {
            languages: Mutex::new(languages),
        }
    }

    fn languages(&self) -> std::sync::MutexGuard<'_, Vec<Language>> {
        self.languages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl LanguageRepository for MemoryLanguageRepository {
    async fn list_all(&self) -> Result<Vec<Language>, LanguagePersistenceError> {
        let mut languages = self.languages().clone();
        languages.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(languages)
    }

    async fn find_by_id(
        &self,
        id: &LanguageId,
    ) -> Result<Option<Language>, LanguagePersistenceError> {
        Ok(self.languages().iter().find(|l| l.id() == id).cloned())
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Language>, LanguagePersistenceError> {
        Ok(self.languages().iter().find(|l| l.slug() == slug).cloned())
    }
}
