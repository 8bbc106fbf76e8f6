//! PostgreSQL persistence adapters built on Diesel.

mod diesel_language_repository;
mod diesel_login_service;
mod diesel_snippet_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
pub mod schema;

pub use diesel_language_repository::DieselLanguageRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_snippet_repository::DieselSnippetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
