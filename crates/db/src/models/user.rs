//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use signage_core::types::{DbId, Timestamp};
use signage_core::user::UserRole;
use sqlx::FromRow;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// `"admin"` or `"manager"`.
    pub role: String,
    pub notice_limit: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Defaults to `manager` if omitted.
    pub role: Option<UserRole>,
    /// Defaults to 10 if omitted.
    pub notice_limit: Option<i32>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub notice_limit: Option<i32>,
}
