//! Back-office users: administrators and building managers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";

/// All valid role strings.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER];

/// Default number of notices a manager may own.
pub const DEFAULT_NOTICE_LIMIT: i32 = 10;

/// Upper bound accepted for a manager's notice limit.
pub const MAX_NOTICE_LIMIT: i32 = 1000;

/// What a user may manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    /// Building manager (síndico); owns notices for their condominiums.
    #[default]
    Manager,
}

impl UserRole {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_MANAGER => Ok(Self::Manager),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Manager => ROLE_MANAGER,
        }
    }
}

/// Field-level checks shared by user create and update.
#[derive(Debug, Validate)]
pub struct UserFields {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(range(
        min = 0,
        max = MAX_NOTICE_LIMIT,
        message = "notice_limit is outside the allowed range"
    ))]
    pub notice_limit: i32,
}

/// Validate user fields, flattening validator output into a [`CoreError`].
pub fn validate_user_fields(fields: &UserFields) -> Result<(), CoreError> {
    fields
        .validate()
        .map_err(|errors| CoreError::Validation(errors.to_string()))
}
