//! Diesel row types and their domain conversions.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Language, LanguageId, LanguageValidationError, Slug, Snippet, SnippetContent, SnippetId,
    SnippetValidationError, User, UserId, UserValidationError, Username,
};

use super::schema::{languages, snippets, users};

/// Queryable row for user accounts (without credentials).
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)?;
        Ok(User::new(UserId::from_uuid(row.id), username))
    }
}

/// Queryable row carrying the stored credential for login verification.
///
/// Never leaves the persistence layer; the domain `User` type does not
/// carry credentials.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CredentialRow {
    pub id: Uuid,
    pub password_hash: String,
}

/// Queryable row for languages.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = languages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LanguageRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl TryFrom<LanguageRow> for Language {
    type Error = LanguageValidationError;

    fn try_from(row: LanguageRow) -> Result<Self, Self::Error> {
        let slug = Slug::new(row.slug)?;
        Language::new(LanguageId::from_uuid(row.id), row.name, slug)
    }
}

/// Queryable row for snippets.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = snippets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SnippetRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub language_id: Uuid,
    pub content: String,
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SnippetRow> for Snippet {
    type Error = SnippetValidationError;

    fn try_from(row: SnippetRow) -> Result<Self, Self::Error> {
        let content = SnippetContent::new(row.content)?;
        Ok(Snippet::new(
            SnippetId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            LanguageId::from_uuid(row.language_id),
            content,
            row.public,
            row.created_at,
        ))
    }
}

/// Insertable row for new snippets.
#[derive(Debug, Insertable)]
#[diesel(table_name = snippets)]
pub(crate) struct NewSnippetRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub language_id: Uuid,
    pub content: String,
    pub public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Snippet> for NewSnippetRow {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: *snippet.id().as_uuid(),
            owner_id: *snippet.owner().as_uuid(),
            language_id: *snippet.language().as_uuid(),
            content: snippet.content().as_ref().to_owned(),
            public: snippet.is_public(),
            created_at: snippet.created_at(),
        }
    }
}

/// Changeset applied by snippet edits. Owner and creation time never change.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = snippets)]
pub(crate) struct SnippetChangeset {
    pub language_id: Uuid,
    pub content: String,
    pub public: bool,
}

impl From<&Snippet> for SnippetChangeset {
    fn from(snippet: &Snippet) -> Self {
        Self {
            language_id: *snippet.language().as_uuid(),
            content: snippet.content().as_ref().to_owned(),
            public: snippet.is_public(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the row/domain conversions.
    use super::*;

    #[test]
    fn snippet_row_round_trips_through_domain() {
        let row = SnippetRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            language_id: Uuid::new_v4(),
            content: "SELECT 1;".to_owned(),
            public: true,
            created_at: Utc::now(),
        };

        let snippet = Snippet::try_from(row.clone()).expect("valid row");
        let insert = NewSnippetRow::from(&snippet);

        assert_eq!(insert.id, row.id);
        assert_eq!(insert.owner_id, row.owner_id);
        assert_eq!(insert.content, row.content);
        assert_eq!(insert.public, row.public);
        assert_eq!(insert.created_at, row.created_at);
    }

    #[test]
    fn blank_snippet_content_is_rejected() {
        let row = SnippetRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            language_id: Uuid::new_v4(),
            content: "   ".to_owned(),
            public: false,
            created_at: Utc::now(),
        };

        assert!(Snippet::try_from(row).is_err());
    }

    #[test]
    fn invalid_username_row_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "has spaces".to_owned(),
        };

        assert!(User::try_from(row).is_err());
    }
}
