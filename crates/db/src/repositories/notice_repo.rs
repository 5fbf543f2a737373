//! Repository for the `notices` table.

use signage_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::notice::{NewNotice, Notice, NoticeChanges};

const COLUMNS: &str = "id, manager_id, name, message, condominium_ids, advertiser_name, \
    advertiser_phone, image_url, video_url, expires_on, created_at, updated_at";

/// A manager's notice allowance, read while the manager row is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerQuota {
    pub notice_limit: i32,
    pub owned: i64,
}

/// Provides CRUD operations for notices.
pub struct NoticeRepo;

impl NoticeRepo {
    /// Insert a new notice, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewNotice) -> Result<Notice, sqlx::Error> {
        let query = format!(
            "INSERT INTO notices (manager_id, name, message, condominium_ids, advertiser_name,
                                  advertiser_phone, image_url, video_url, expires_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notice>(&query)
            .bind(input.manager_id)
            .bind(&input.name)
            .bind(&input.message)
            .bind(&input.condominium_ids)
            .bind(&input.advertiser_name)
            .bind(&input.advertiser_phone)
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(input.expires_on)
            .fetch_one(pool)
            .await
    }

    /// Find a notice by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Notice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notices WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Notice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notices, newest first, optionally restricted to those targeting a condominium.
    pub async fn list(
        pool: &PgPool,
        condominium_id: Option<DbId>,
    ) -> Result<Vec<Notice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notices
             WHERE deleted_at IS NULL AND ($1::BIGINT IS NULL OR $1 = ANY(condominium_ids))
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notice>(&query)
            .bind(condominium_id)
            .fetch_all(pool)
            .await
    }

    /// List the notices authored by a manager, newest first.
    pub async fn list_by_manager(
        pool: &PgPool,
        manager_id: DbId,
    ) -> Result<Vec<Notice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notices
             WHERE manager_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notice>(&query)
            .bind(manager_id)
            .fetch_all(pool)
            .await
    }

    /// Update a notice. Only non-`None` fields in `changes` are applied.
    ///
    /// `expires_on: Some(None)` clears the expiration.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &NoticeChanges,
    ) -> Result<Option<Notice>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let notice = Self::update_in(&mut tx, id, changes).await?;
        tx.commit().await?;
        Ok(notice)
    }

    /// Insert a notice for a manager, serialized against other writes for
    /// the same manager.
    ///
    /// The manager row is locked with `FOR UPDATE` and `admit` sees the
    /// locked [`ManagerQuota`] (`None` when the manager does not exist).
    /// The insert only happens if `admit` returns `Ok`. `input.manager_id` is
    /// ignored in favour of `manager_id`.
    pub async fn create_for_manager<E, F>(
        pool: &PgPool,
        manager_id: DbId,
        input: &NewNotice,
        admit: F,
    ) -> Result<Notice, E>
    where
        E: From<sqlx::Error>,
        F: FnOnce(Option<ManagerQuota>) -> Result<(), E>,
    {
        let mut tx = pool.begin().await?;
        admit(Self::lock_manager_quota(&mut tx, manager_id).await?)?;

        let query = format!(
            "INSERT INTO notices (manager_id, name, message, condominium_ids, advertiser_name,
                                  advertiser_phone, image_url, video_url, expires_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let notice = sqlx::query_as::<_, Notice>(&query)
            .bind(manager_id)
            .bind(&input.name)
            .bind(&input.message)
            .bind(&input.condominium_ids)
            .bind(&input.advertiser_name)
            .bind(&input.advertiser_phone)
            .bind(&input.image_url)
            .bind(&input.video_url)
            .bind(input.expires_on)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(notice)
    }

    /// Apply `changes` to a notice that moves to `manager_id`, under the same
    /// lock as [`NoticeRepo::create_for_manager`].
    ///
    /// `changes.manager_id` is ignored in favour of `manager_id`.
    pub async fn reassign<E, F>(
        pool: &PgPool,
        id: DbId,
        manager_id: DbId,
        changes: &NoticeChanges,
        admit: F,
    ) -> Result<Option<Notice>, E>
    where
        E: From<sqlx::Error>,
        F: FnOnce(Option<ManagerQuota>) -> Result<(), E>,
    {
        let mut tx = pool.begin().await?;
        admit(Self::lock_manager_quota(&mut tx, manager_id).await?)?;

        let changes = NoticeChanges {
            manager_id: Some(manager_id),
            ..changes.clone()
        };
        let notice = Self::update_in(&mut tx, id, &changes).await?;
        tx.commit().await?;
        Ok(notice)
    }

    /// Soft-delete a notice by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notices SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Lock a live manager row and count the notices it owns.
    async fn lock_manager_quota(
        tx: &mut Transaction<'_, Postgres>,
        manager_id: DbId,
    ) -> Result<Option<ManagerQuota>, sqlx::Error> {
        let limit: Option<(i32,)> = sqlx::query_as(
            "SELECT notice_limit FROM users WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(manager_id)
        .fetch_optional(&mut **tx)
        .await?;
        let Some((notice_limit,)) = limit else {
            return Ok(None);
        };

        let (owned,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notices WHERE manager_id = $1 AND deleted_at IS NULL",
        )
        .bind(manager_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(Some(ManagerQuota {
            notice_limit,
            owned,
        }))
    }

    /// Partial update within an open transaction.
    async fn update_in(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        changes: &NoticeChanges,
    ) -> Result<Option<Notice>, sqlx::Error> {
        let query = format!(
            "UPDATE notices SET
                manager_id = COALESCE($2, manager_id),
                name = COALESCE($3, name),
                message = COALESCE($4, message),
                condominium_ids = COALESCE($5, condominium_ids),
                advertiser_name = COALESCE($6, advertiser_name),
                advertiser_phone = COALESCE($7, advertiser_phone),
                image_url = COALESCE($8, image_url),
                video_url = COALESCE($9, video_url),
                expires_on = CASE WHEN $10 THEN $11 ELSE expires_on END
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notice>(&query)
            .bind(id)
            .bind(changes.manager_id)
            .bind(&changes.name)
            .bind(&changes.message)
            .bind(&changes.condominium_ids)
            .bind(&changes.advertiser_name)
            .bind(&changes.advertiser_phone)
            .bind(&changes.image_url)
            .bind(&changes.video_url)
            .bind(changes.expires_on.is_some())
            .bind(changes.expires_on.flatten())
            .fetch_optional(&mut **tx)
            .await
    }
}
