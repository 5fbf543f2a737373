//! Repository for the `condominiums` table.

use signage_core::types::DbId;
use sqlx::PgPool;

use crate::models::condominium::{
    Condominium, CondominiumSummary, CreateCondominium, UpdateCondominium,
};

const COLUMNS: &str = "id, name, manager_id, cep, location, created_at, updated_at";

/// Provides CRUD operations for condominiums.
pub struct CondominiumRepo;

impl CondominiumRepo {
    /// Insert a new condominium. `cep` must already be normalized to digits.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCondominium,
    ) -> Result<Condominium, sqlx::Error> {
        let query = format!(
            "INSERT INTO condominiums (name, manager_id, cep, location)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Condominium>(&query)
            .bind(&input.name)
            .bind(input.manager_id)
            .bind(&input.cep)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// Find a condominium by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Condominium>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM condominiums WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Condominium>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List condominiums by name with the number of live TVs in each.
    pub async fn list_with_tv_count(
        pool: &PgPool,
    ) -> Result<Vec<CondominiumSummary>, sqlx::Error> {
        sqlx::query_as::<_, CondominiumSummary>(
            "SELECT c.id, c.name, c.manager_id, c.cep, c.location,
                    COUNT(t.id) AS tv_count, c.created_at, c.updated_at
             FROM condominiums c
             LEFT JOIN tvs t ON t.condominium_id = c.id AND t.deleted_at IS NULL
             WHERE c.deleted_at IS NULL
             GROUP BY c.id
             ORDER BY c.name, c.id",
        )
        .fetch_all(pool)
        .await
    }

    /// List the condominiums assigned to a manager.
    pub async fn list_by_manager(
        pool: &PgPool,
        manager_id: DbId,
    ) -> Result<Vec<Condominium>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM condominiums
             WHERE manager_id = $1 AND deleted_at IS NULL
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Condominium>(&query)
            .bind(manager_id)
            .fetch_all(pool)
            .await
    }

    /// Count live condominiums.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM condominiums WHERE deleted_at IS NULL")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Update a condominium. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCondominium,
    ) -> Result<Option<Condominium>, sqlx::Error> {
        let query = format!(
            "UPDATE condominiums SET
                name = COALESCE($2, name),
                manager_id = COALESCE($3, manager_id),
                cep = COALESCE($4, cep),
                location = COALESCE($5, location)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Condominium>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.manager_id)
            .bind(&input.cep)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a condominium and its TVs, and drop it from every ad and
    /// notice targeting it. Returns `true` if the condominium was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let result = sqlx::query(
            "UPDATE condominiums SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        sqlx::query(
            "UPDATE tvs SET deleted_at = NOW() WHERE condominium_id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        for table in ["ads", "notices"] {
            sqlx::query(&format!(
                "UPDATE {table} SET condominium_ids = array_remove(condominium_ids, $1)
                 WHERE $1 = ANY(condominium_ids)"
            ))
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(true)
    }
}
