//! User account model.

use serde::Serialize;
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// The password hash never leaves the db/api boundary; it is skipped during
/// serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user. The hash is produced by the api crate.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
