//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; regenerate with `diesel print-schema` when migrations change.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle (max 32 characters).
        username -> Varchar,
        /// bcrypt hash of the user's password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Programming languages snippets can be tagged with.
    languages (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable language name.
        name -> Varchar,
        /// Unique URL-safe identifier.
        slug -> Varchar,
    }
}

diesel::table! {
    /// Stored snippets.
    snippets (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user (foreign key to `users`).
        owner_id -> Uuid,
        /// Language tag (foreign key to `languages`).
        language_id -> Uuid,
        /// Raw snippet text.
        content -> Text,
        /// Whether the snippet is visible to everyone.
        public -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(snippets -> users (owner_id));
diesel::joinable!(snippets -> languages (language_id));

diesel::allow_tables_to_appear_in_same_query!(languages, snippets, users);
