//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod highlighter;
mod language_repository;
mod login_service;
mod snippet_repository;
mod user_repository;

pub use highlighter::SyntaxHighlighter;
pub use language_repository::{
    LanguagePersistenceError, LanguageRepository, MemoryLanguageRepository,
};
pub use login_service::{FixtureLoginService, LoginService};
pub use snippet_repository::{
    MemorySnippetRepository, SnippetPersistenceError, SnippetRepository,
};
pub use user_repository::{MemoryUserRepository, UserPersistenceError, UserRepository};
