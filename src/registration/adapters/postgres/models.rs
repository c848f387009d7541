//! Diesel row models for registration persistence.

use super::schema::{registration_profiles, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for directory account records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Internal account identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Unique identifying username.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub username: String,
    /// Notification address.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub email: String,
    /// Argon2 credential hash.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub password_hash: String,
    /// Whether the account may sign in.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub is_active: bool,
    /// Join timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub joined_at: DateTime<Utc>,
}

/// Insert model for directory account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Internal account identifier.
    pub id: uuid::Uuid,
    /// Unique identifying username.
    pub username: String,
    /// Notification address.
    pub email: String,
    /// Argon2 credential hash.
    pub password_hash: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Query result row for registration profile records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = registration_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Internal profile identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning account identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub user_id: uuid::Uuid,
    /// Pending activation token or the consumed sentinel.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub activation_key: String,
    /// Whether activation has completed.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub activated: bool,
}

/// Insert model for registration profile records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registration_profiles)]
pub struct NewProfileRow {
    /// Internal profile identifier.
    pub id: uuid::Uuid,
    /// Owning account identifier.
    pub user_id: uuid::Uuid,
    /// Pending activation token or the consumed sentinel.
    pub activation_key: String,
    /// Whether activation has completed.
    pub activated: bool,
}
