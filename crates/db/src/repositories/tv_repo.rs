//! Repository for the `tvs` table.

use signage_core::rotation::RotationConfig;
use signage_core::types::DbId;
use sqlx::PgPool;

use crate::models::tv::{Tv, UpdateTv};

const COLUMNS: &str = "id, condominium_id, name, connection_code, template, connectivity, \
    notice_quota, ad_quota, news_quota, created_at, updated_at";

/// Validated values written by [`TvRepo::create`].
#[derive(Debug, Clone)]
pub struct NewTv {
    pub condominium_id: DbId,
    pub name: String,
    pub connection_code: String,
    pub template: String,
    pub connectivity: &'static str,
    pub rotation: RotationConfig,
}

/// Provides CRUD operations for TVs.
pub struct TvRepo;

impl TvRepo {
    /// Insert a new TV, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewTv) -> Result<Tv, sqlx::Error> {
        let query = format!(
            "INSERT INTO tvs (condominium_id, name, connection_code, template, connectivity,
                              notice_quota, ad_quota, news_quota)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tv>(&query)
            .bind(input.condominium_id)
            .bind(&input.name)
            .bind(&input.connection_code)
            .bind(&input.template)
            .bind(input.connectivity)
            .bind(quota(input.rotation.notice_quota))
            .bind(quota(input.rotation.ad_quota))
            .bind(quota(input.rotation.news_quota))
            .fetch_one(pool)
            .await
    }

    /// Find a TV by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tv>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tvs WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Tv>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live TV by its connection code.
    pub async fn find_by_connection_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Tv>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tvs WHERE connection_code = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Tv>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List TVs, optionally restricted to one condominium.
    pub async fn list(pool: &PgPool, condominium_id: Option<DbId>) -> Result<Vec<Tv>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tvs
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR condominium_id = $1)
             ORDER BY condominium_id, name, id"
        );
        sqlx::query_as::<_, Tv>(&query)
            .bind(condominium_id)
            .fetch_all(pool)
            .await
    }

    /// Update a TV's descriptive fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTv,
    ) -> Result<Option<Tv>, sqlx::Error> {
        let query = format!(
            "UPDATE tvs SET
                condominium_id = COALESCE($2, condominium_id),
                name = COALESCE($3, name),
                connection_code = COALESCE($4, connection_code),
                template = COALESCE($5, template),
                connectivity = COALESCE($6, connectivity)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tv>(&query)
            .bind(id)
            .bind(input.condominium_id)
            .bind(&input.name)
            .bind(&input.connection_code)
            .bind(&input.template)
            .bind(input.connectivity.map(|c| c.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Replace a TV's rotation quotas.
    pub async fn update_rotation(
        pool: &PgPool,
        id: DbId,
        config: &RotationConfig,
    ) -> Result<Option<Tv>, sqlx::Error> {
        let query = format!(
            "UPDATE tvs SET notice_quota = $2, ad_quota = $3, news_quota = $4
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tv>(&query)
            .bind(id)
            .bind(quota(config.notice_quota))
            .bind(quota(config.ad_quota))
            .bind(quota(config.news_quota))
            .fetch_optional(pool)
            .await
    }

    /// Store a new connection code for a TV.
    pub async fn set_connection_code(
        pool: &PgPool,
        id: DbId,
        code: &str,
    ) -> Result<Option<Tv>, sqlx::Error> {
        let query = format!(
            "UPDATE tvs SET connection_code = $2
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tv>(&query)
            .bind(id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a TV by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE tvs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Quotas are clamped to `MAX_QUOTA` upstream, so they always fit an `INTEGER`.
fn quota(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
