//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing (or importing) the backing infrastructure, which keeps HTTP
//! handler tests deterministic: they substitute a test double instead of
//! wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// In-memory authenticator for tests and database-less runs.
///
/// `admin` / `password` authenticates successfully and produces the
/// configured user id; everything else is rejected.
#[derive(Debug, Clone, Copy)]
pub struct FixtureLoginService {
    user_id: UserId,
}

impl FixtureLoginService {
    /// Username accepted by the fixture.
    pub const USERNAME: &'static str = "admin";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";

    /// Build a fixture that authenticates as `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == Self::USERNAME && credentials.password() == Self::PASSWORD {
            Ok(self.user_id)
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
