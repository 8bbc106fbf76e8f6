//! Port abstraction for user persistence adapters and their errors.
//!
//! The application has no registration flow; users are provisioned out of
//! band (seed migrations, fixtures), so the port is read-only.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory user repository used by handler tests and database-less runs.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    /// Build a repository pre-populated with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    fn users(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users().iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users()
            .iter()
            .find(|u| u.username() == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn user(name: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(name).expect("valid username"),
        )
    }

    #[tokio::test]
    async fn finds_seeded_users_by_id_and_name() {
        let ada = user("ada");
        let repository = MemoryUserRepository::with_users(vec![ada.clone(), user("grace")]);

        let by_id = repository
            .find_by_id(ada.id())
            .await
            .expect("find by id succeeds");
        assert_eq!(by_id, Some(ada.clone()));

        let by_name = repository
            .find_by_username(ada.username())
            .await
            .expect("find by username succeeds");
        assert_eq!(by_name, Some(ada));
    }

    #[tokio::test]
    async fn find_missing_user_returns_none() {
        let repository = MemoryUserRepository::default();
        let found = repository
            .find_by_id(&UserId::random())
            .await
            .expect("find succeeds");
        assert!(found.is_none());
    }
}
