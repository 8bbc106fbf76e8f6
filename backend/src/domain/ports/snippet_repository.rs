//! Port abstraction for snippet persistence adapters and their errors.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{LanguageId, Snippet, SnippetId, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by snippet repository adapters.
    pub enum SnippetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "snippet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "snippet repository query failed: {message}",
    }
}

/// Durable storage for snippets.
///
/// Listings are returned newest-first. Atomicity of each operation is
/// delegated to the backing store.
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Insert a new snippet record.
    async fn create(&self, snippet: &Snippet) -> Result<(), SnippetPersistenceError>;

    /// Persist edits to an existing snippet.
    async fn update(&self, snippet: &Snippet) -> Result<(), SnippetPersistenceError>;

    /// Delete a snippet. Deleting an absent snippet is a no-op.
    async fn delete(&self, id: &SnippetId) -> Result<(), SnippetPersistenceError>;

    /// Fetch a snippet by identifier.
    async fn find_by_id(&self, id: &SnippetId)
        -> Result<Option<Snippet>, SnippetPersistenceError>;

    /// Every stored snippet, newest first.
    async fn list_all(&self) -> Result<Vec<Snippet>, SnippetPersistenceError>;

    /// Snippets owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId)
        -> Result<Vec<Snippet>, SnippetPersistenceError>;

    /// Snippets tagged with `language`, newest first.
    async fn list_by_language(
        &self,
        language: &LanguageId,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError>;
}

/// In-memory snippet repository used by handler tests and database-less runs.
#[derive(Debug, Default)]
pub struct MemorySnippetRepository {
    snippets: Mutex<Vec<Snippet>>,
}

impl MemorySnippetRepository {
    /// Build a repository pre-populated with `snippets`.
    pub fn with_snippets(snippets: Vec<Snippet>) -> Self {
        Self {
            snippets: Mutex::new(snippets),
        }
    }

    fn snippets(&self) -> std::sync::MutexGuard<'_, Vec<Snippet>> {
        self.snippets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn sorted<F>(&self, keep: F) -> Vec<Snippet>
    where
        F: Fn(&Snippet) -> bool,
    {
        let mut matches: Vec<Snippet> = self
            .snippets()
            .iter()
            .filter(|&s| keep(s))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        matches
    }
}

#[async_trait]
impl SnippetRepository for MemorySnippetRepository {
    async fn create(&self, snippet: &Snippet) -> Result<(), SnippetPersistenceError> {
        let mut snippets = self.snippets();
        if snippets.iter().any(|s| s.id() == snippet.id()) {
            return Err(SnippetPersistenceError::query("snippet id already exists"));
        }
        snippets.push(snippet.clone());
        Ok(())
    }

    async fn update(&self, snippet: &Snippet) -> Result<(), SnippetPersistenceError> {
        let mut snippets = self.snippets();
        match snippets.iter_mut().find(|s| s.id() == snippet.id()) {
            Some(stored) => {
                *stored = snippet.clone();
                Ok(())
            }
            None => Err(SnippetPersistenceError::query(
                "snippet not found for update",
            )),
        }
    }

    async fn delete(&self, id: &SnippetId) -> Result<(), SnippetPersistenceError> {
        self.snippets().retain(|s| s.id() != id);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SnippetId,
    ) -> Result<Option<Snippet>, SnippetPersistenceError> {
        Ok(self.snippets().iter().find(|s| s.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        Ok(self.sorted(|_| true))
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        Ok(self.sorted(|s| s.owner() == owner))
    }

    async fn list_by_language(
        &self,
        language: &LanguageId,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        Ok(self.sorted(|s| s.language() == language))
    }
}
