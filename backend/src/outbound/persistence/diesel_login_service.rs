//! Diesel-backed `LoginService` adapter verifying bcrypt password hashes.
//!
//! Credential storage mechanics stay inside this adapter: the stored hash is
//! read through a dedicated row type and never reaches the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::CredentialRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed `LoginService` checking credentials against the users table.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> Error {
    map_pool_error(error, Error::service_unavailable)
}

fn diesel_error(error: diesel::result::Error) -> Error {
    map_diesel_error(error, Error::internal, Error::service_unavailable)
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CredentialRow> = users::table
            .filter(users::username.eq(credentials.username()))
            .select(CredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        let Some(row) = row else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = bcrypt::verify(credentials.password(), &row.password_hash)
            .map_err(|err| {
                warn!(error = %err, "stored password hash failed to parse");
                Error::internal("credential verification failed")
            })?;

        if matches {
            Ok(UserId::from_uuid(row.id))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
