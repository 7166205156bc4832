//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Directory accounts.
    ///
    /// `username` and `email` carry unique constraints; `role` defaults to
    /// `'user'` and both timestamps default to `now()`.
    users (id) {
        /// Store-assigned serial identifier.
        id -> Int4,
        username -> Varchar,
        email -> Varchar,
        /// bcrypt hash; never leaves the persistence layer except for login.
        password_hash -> Varchar,
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
