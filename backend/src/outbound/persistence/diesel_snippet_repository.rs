//! PostgreSQL-backed `SnippetRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SnippetPersistenceError, SnippetRepository};
use crate::domain::{LanguageId, Snippet, SnippetId, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewSnippetRow, SnippetChangeset, SnippetRow};
use super::pool::{DbPool, PoolError};
use super::schema::snippets;

/// Diesel-backed implementation of the `SnippetRepository` port.
#[derive(Clone)]
pub struct DieselSnippetRepository {
    pool: DbPool,
}

impl DieselSnippetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> SnippetPersistenceError {
    map_pool_error(error, SnippetPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> SnippetPersistenceError {
    map_diesel_error(
        error,
        SnippetPersistenceError::query,
        SnippetPersistenceError::connection,
    )
}

fn rows_to_snippets(rows: Vec<SnippetRow>) -> Result<Vec<Snippet>, SnippetPersistenceError> {
    rows.into_iter()
        .map(|row| {
            Snippet::try_from(row)
                .map_err(|err| SnippetPersistenceError::query(format!("invalid snippet row: {err}")))
        })
        .collect()
}

#[async_trait]
impl SnippetRepository for DieselSnippetRepository {
    async fn create(&self, snippet: &Snippet) -> Result<(), SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(snippets::table)
            .values(NewSnippetRow::from(snippet))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn update(&self, snippet: &Snippet) -> Result<(), SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::update(snippets::table.find(snippet.id().as_uuid()))
            .set(SnippetChangeset::from(snippet))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        if affected == 0 {
            return Err(SnippetPersistenceError::query(
                "snippet not found for update",
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &SnippetId) -> Result<(), SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::delete(snippets::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &SnippetId,
    ) -> Result<Option<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<SnippetRow> = snippets::table
            .find(id.as_uuid())
            .select(SnippetRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| {
            Snippet::try_from(row)
                .map_err(|err| SnippetPersistenceError::query(format!("invalid snippet row: {err}")))
        })
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<SnippetRow> = snippets::table
            .order(snippets::created_at.desc())
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_snippets(rows)
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<SnippetRow> = snippets::table
            .filter(snippets::owner_id.eq(owner.as_uuid()))
            .order(snippets::created_at.desc())
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_snippets(rows)
    }

    async fn list_by_language(
        &self,
        language: &LanguageId,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<SnippetRow> = snippets::table
            .filter(snippets::language_id.eq(language.as_uuid()))
            .order(snippets::created_at.desc())
            .select(SnippetRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows_to_snippets(rows)
    }
}
