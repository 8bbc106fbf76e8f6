//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LanguageRepository, LoginService, SnippetRepository, SyntaxHighlighter, UserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub snippets: Arc<dyn SnippetRepository>,
    pub users: Arc<dyn UserRepository>,
    pub languages: Arc<dyn LanguageRepository>,
    pub login: Arc<dyn LoginService>,
    pub highlighter: Arc<dyn SyntaxHighlighter>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        snippets: Arc<dyn SnippetRepository>,
        users: Arc<dyn UserRepository>,
        languages: Arc<dyn LanguageRepository>,
        login: Arc<dyn LoginService>,
        highlighter: Arc<dyn SyntaxHighlighter>,
    ) -> Self {
        Self {
            snippets,
            users,
            languages,
            login,
            highlighter,
        }
    }
}
