//! Repository for the `ads` table.

use signage_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::ad::{Ad, AdChanges, NewAd};

const COLUMNS: &str = "id, name, advertiser_name, advertiser_phone, condominium_ids, expires_on, \
    archive_url, display_seconds, created_at, updated_at";

/// Provides CRUD operations for ads.
pub struct AdRepo;

impl AdRepo {
    /// Insert a new ad, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewAd) -> Result<Ad, sqlx::Error> {
        let query = format!(
            "INSERT INTO ads (name, advertiser_name, advertiser_phone, condominium_ids,
                              expires_on, archive_url, display_seconds)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(&input.name)
            .bind(&input.advertiser_name)
            .bind(&input.advertiser_phone)
            .bind(&input.condominium_ids)
            .bind(input.expires_on)
            .bind(&input.archive_url)
            .bind(input.display_seconds)
            .fetch_one(pool)
            .await
    }

    /// Find an ad by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ads WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List ads, newest first, optionally restricted to those targeting a condominium.
    pub async fn list(pool: &PgPool, condominium_id: Option<DbId>) -> Result<Vec<Ad>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ads
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR $1 = ANY(condominium_ids))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(condominium_id)
            .fetch_all(pool)
            .await
    }

    /// Expiration dates of every live ad, for dashboard counting.
    pub async fn list_expirations(pool: &PgPool) -> Result<Vec<Date>, sqlx::Error> {
        let rows: Vec<(Date,)> =
            sqlx::query_as("SELECT expires_on FROM ads WHERE deleted_at IS NULL")
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(d,)| d).collect())
    }

    /// Update an ad. Only non-`None` fields in `changes` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &AdChanges,
    ) -> Result<Option<Ad>, sqlx::Error> {
        let query = format!(
            "UPDATE ads SET
                name = COALESCE($2, name),
                advertiser_name = COALESCE($3, advertiser_name),
                advertiser_phone = COALESCE($4, advertiser_phone),
                condominium_ids = COALESCE($5, condominium_ids),
                expires_on = COALESCE($6, expires_on),
                archive_url = COALESCE($7, archive_url),
                display_seconds = COALESCE($8, display_seconds)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ad>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.advertiser_name)
            .bind(&changes.advertiser_phone)
            .bind(&changes.condominium_ids)
            .bind(changes.expires_on)
            .bind(&changes.archive_url)
            .bind(changes.display_seconds)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an ad by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE ads SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
