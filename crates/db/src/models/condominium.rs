//! Condominium entity model and DTOs.

use serde::{Deserialize, Serialize};
use signage_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A condominium row from the `condominiums` table.
///
/// `cep` holds eight bare digits.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Condominium {
    pub id: DbId,
    pub name: String,
    pub manager_id: Option<DbId>,
    pub cep: String,
    pub location: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A condominium with the number of TVs installed in it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CondominiumSummary {
    pub id: DbId,
    pub name: String,
    pub manager_id: Option<DbId>,
    pub cep: String,
    pub location: String,
    pub tv_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new condominium.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCondominium {
    pub name: String,
    pub manager_id: Option<DbId>,
    pub cep: String,
    pub location: String,
}

/// DTO for updating an existing condominium. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCondominium {
    pub name: Option<String>,
    pub manager_id: Option<DbId>,
    pub cep: Option<String>,
    pub location: Option<String>,
}
