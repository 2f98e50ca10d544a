//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database when the migrations change.

diesel::table! {
    /// Registered users.
    ///
    /// The `id` column is a 26-character ULID; its lexical order follows
    /// creation order.
    users (id) {
        /// Primary key: ULID identifier.
        id -> Varchar,
        /// Name shown in the user list (max 10 characters).
        name -> Varchar,
    }
}

diesel::table! {
    /// Posts written by users.
    posts (id) {
        /// Primary key: ULID identifier.
        id -> Varchar,
        /// Owning user; enforced by a foreign key.
        user_id -> Varchar,
        /// Post body.
        text -> Text,
    }
}

diesel::table! {
    /// Standalone todo items.
    todos (id) {
        /// Primary key: ULID identifier.
        id -> Varchar,
        /// Todo body.
        text -> Text,
        /// Completion state label: OPEN or CLOSE.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(posts, users);
