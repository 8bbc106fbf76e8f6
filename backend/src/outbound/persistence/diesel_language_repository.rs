//! PostgreSQL-backed `LanguageRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LanguagePersistenceError, LanguageRepository};
use crate::domain::{Language, LanguageId, Slug};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::LanguageRow;
use super::pool::{DbPool, PoolError};
use super::schema::languages;

/// Diesel-backed implementation of the `LanguageRepository` port.
#[derive(Clone)]
pub struct DieselLanguageRepository {
    pool: DbPool,
}

impl DieselLanguageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> LanguagePersistenceError {
    map_pool_error(error, LanguagePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> LanguagePersistenceError {
    map_diesel_error(
        error,
        LanguagePersistenceError::query,
        LanguagePersistenceError::connection,
    )
}

fn row_to_language(row: LanguageRow) -> Result<Language, LanguagePersistenceError> {
    Language::try_from(row)
        .map_err(|err| LanguagePersistenceError::query(format!("invalid language row: {err}")))
}

#[async_trait]
impl LanguageRepository for DieselLanguageRepository {
    async fn list_all(&self) -> Result<Vec<Language>, LanguagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<LanguageRow> = languages::table
            .order(languages::name.asc())
            .select(LanguageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_language).collect()
    }

    async fn find_by_id(
        &self,
        id: &LanguageId,
    ) -> Result<Option<Language>, LanguagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<LanguageRow> = languages::table
            .find(id.as_uuid())
            .select(LanguageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_language).transpose()
    }

    async fn find_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<Language>, LanguagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<LanguageRow> = languages::table
            .filter(languages::slug.eq(slug.as_ref()))
            .select(LanguageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_language).transpose()
    }
}
