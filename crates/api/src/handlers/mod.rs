//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate through `signage_core`, delegate to the matching
//! repository in `signage_db` and map errors via [`AppError`].

pub mod ads;
pub mod condominiums;
pub mod dashboard;
pub mod notices;
pub mod rotation;
pub mod tvs;
pub mod users;

use serde::Serialize;
use signage_core::error::CoreError;
use signage_core::status::ContentStatus;
use signage_core::types::DbId;
use signage_db::models::condominium::Condominium;
use signage_db::models::tv::Tv;
use signage_db::models::user::User;
use signage_db::repositories::{CondominiumRepo, TvRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::WithStatus;

// ---------------------------------------------------------------------------
// Existence checks
// ---------------------------------------------------------------------------

/// Verify that a user exists, returning the full row.
pub(crate) async fn ensure_user_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Verify that a condominium exists, returning the full row.
pub(crate) async fn ensure_condominium_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<Condominium> {
    CondominiumRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Condominium",
            id,
        })
    })
}

/// Verify that every targeted condominium exists.
pub(crate) async fn ensure_condominiums_exist(pool: &sqlx::PgPool, ids: &[DbId]) -> AppResult<()> {
    for &id in ids {
        ensure_condominium_exists(pool, id).await?;
    }
    Ok(())
}

/// Verify that a TV exists, returning the full row.
pub(crate) async fn ensure_tv_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Tv> {
    TvRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "TV", id }))
}

// ---------------------------------------------------------------------------
// Status decoration
// ---------------------------------------------------------------------------

/// Attach a derived status to each item, keeping only those matching `wanted`.
pub(crate) fn decorate_with_status<T, F>(
    items: Vec<T>,
    status_of: F,
    wanted: Option<ContentStatus>,
) -> Vec<WithStatus<T>>
where
    T: Serialize,
    F: Fn(&T) -> ContentStatus,
{
    items
        .into_iter()
        .map(|item| {
            let status = status_of(&item);
            WithStatus { item, status }
        })
        .filter(|decorated| wanted.map_or(true, |w| decorated.status == w))
        .collect()
}

/// Reject an optional text field that is present but blank.
pub(crate) fn validate_optional_title(value: Option<&str>, field: &str) -> AppResult<()> {
    if let Some(value) = value {
        signage_core::content::validate_title(value, field)?;
    }
    Ok(())
}
