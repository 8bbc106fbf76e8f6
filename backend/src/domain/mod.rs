//! Domain entities, policies, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers, plus the visibility rules governing who may see and
//! modify which snippets. Keep types immutable where practical and document
//! invariants in each type's Rustdoc. Nothing in this module imports the web
//! framework or the ORM.

pub mod auth;
pub mod error;
pub mod language;
pub mod ports;
mod slug;
pub mod snippet;
pub mod user;
pub mod visibility;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::language::{Language, LanguageId, LanguageValidationError, Slug};
pub use self::snippet::{Snippet, SnippetContent, SnippetId, SnippetValidationError};
pub use self::user::{User, UserId, Username, UserValidationError};
pub use self::visibility::Viewer;

/// Convenient result alias for operations that surface domain errors.
pub type ApiResult<T> = Result<T, Error>;
