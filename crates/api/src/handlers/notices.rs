//! Handlers for the `/notices` resource.
//!
//! Notices may omit an expiration date, in which case they never expire.
//! A manager can own at most `notice_limit` live notices.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use signage_core::content::{check_notice_limit, validate_message, validate_title};
use signage_core::error::CoreError;
use signage_core::ids::validate_id_list;
use signage_core::status::{parse_expiration_input, validate_expiration_not_past};
use signage_core::types::{Date, DbId};
use signage_db::models::notice::{CreateNotice, NewNotice, NoticeChanges, UpdateNotice};
use signage_db::repositories::notice_repo::ManagerQuota;
use signage_db::repositories::NoticeRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{
    decorate_with_status, ensure_condominiums_exist, ensure_user_exists, validate_optional_title,
};
use crate::query::ContentFilterParams;
use crate::response::{DataResponse, WithStatus};
use crate::state::AppState;

/// Parse an optional notice expiration and refuse past dates. Blank means none.
fn optional_expiration(raw: &str, today: Date) -> AppResult<Option<Date>> {
    let expires_on = parse_expiration_input(raw)?;
    validate_expiration_not_past(expires_on, today)?;
    Ok(expires_on)
}

/// Admit a write for `manager_id` if the locked manager exists and has room
/// for one more notice.
fn admit_for_manager(manager_id: DbId, quota: Option<ManagerQuota>) -> AppResult<()> {
    let quota = quota.ok_or(AppError::Core(CoreError::NotFound {
        entity: "User",
        id: manager_id,
    }))?;
    check_notice_limit(quota.owned, quota.notice_limit)?;
    Ok(())
}

/// GET /api/v1/notices
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ContentFilterParams>,
) -> AppResult<impl IntoResponse> {
    let wanted = params.status()?;
    let notices = NoticeRepo::list(&state.pool, params.condominium_id).await?;
    let today = state.clock.today();

    let items = decorate_with_status(notices, |notice| notice.status_on(today), wanted);
    tracing::debug!(count = items.len(), "Listed notices");
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/notices/manager/{manager_id}
pub async fn list_by_manager(
    State(state): State<AppState>,
    Path(manager_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_user_exists(&state.pool, manager_id).await?;
    let notices = NoticeRepo::list_by_manager(&state.pool, manager_id).await?;
    let today = state.clock.today();

    let items = decorate_with_status(notices, |notice| notice.status_on(today), None);
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/notices
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateNotice>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();

    validate_title(&input.name, "name")?;
    validate_message(&input.message)?;
    validate_id_list(&input.condominium_ids, "condominium_ids")?;
    let expires_on = match input.expires_on.as_deref() {
        Some(raw) => optional_expiration(raw, today)?,
        None => None,
    };
    ensure_condominiums_exist(&state.pool, &input.condominium_ids).await?;

    let new_notice = NewNotice {
        manager_id: input.manager_id,
        name: input.name,
        message: input.message,
        condominium_ids: input.condominium_ids,
        advertiser_name: input.advertiser_name,
        advertiser_phone: input.advertiser_phone,
        image_url: input.image_url,
        video_url: input.video_url,
        expires_on,
    };
    let notice = match new_notice.manager_id {
        Some(manager_id) => {
            NoticeRepo::create_for_manager(&state.pool, manager_id, &new_notice, |quota| {
                admit_for_manager(manager_id, quota)
            })
            .await?
        }
        None => NoticeRepo::create(&state.pool, &new_notice).await?,
    };
    tracing::info!(
        notice_id = notice.id,
        manager_id = ?notice.manager_id,
        "Notice created"
    );

    let status = notice.status_on(today);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: WithStatus {
                item: notice,
                status,
            },
        }),
    ))
}

/// GET /api/v1/notices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let notice = NoticeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id,
        }))?;
    let status = notice.status_on(state.clock.today());
    Ok(Json(DataResponse {
        data: WithStatus {
            item: notice,
            status,
        },
    }))
}

/// PUT /api/v1/notices/{id}
///
/// `expires_on: ""` clears the expiration. Moving a notice to another
/// manager counts against that manager's limit.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotice>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let existing = NoticeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id,
        }))?;

    validate_optional_title(input.name.as_deref(), "name")?;
    if let Some(message) = &input.message {
        validate_message(message)?;
    }
    if let Some(ids) = &input.condominium_ids {
        validate_id_list(ids, "condominium_ids")?;
        ensure_condominiums_exist(&state.pool, ids).await?;
    }
    let expires_on = input
        .expires_on
        .as_deref()
        .map(|raw| optional_expiration(raw, today))
        .transpose()?;
    let reassigned_to = input
        .manager_id
        .filter(|manager_id| existing.manager_id != Some(*manager_id));

    let changes = NoticeChanges {
        manager_id: input.manager_id,
        name: input.name,
        message: input.message,
        condominium_ids: input.condominium_ids,
        advertiser_name: input.advertiser_name,
        advertiser_phone: input.advertiser_phone,
        image_url: input.image_url,
        video_url: input.video_url,
        expires_on,
    };
    let updated = match reassigned_to {
        Some(manager_id) => {
            NoticeRepo::reassign(&state.pool, id, manager_id, &changes, |quota| {
                admit_for_manager(manager_id, quota)
            })
            .await?
        }
        None => NoticeRepo::update(&state.pool, id, &changes).await?,
    };
    let notice = updated.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Notice",
        id,
    }))?;
    tracing::info!(notice_id = id, "Notice updated");

    let status = notice.status_on(today);
    Ok(Json(DataResponse {
        data: WithStatus {
            item: notice,
            status,
        },
    }))
}

/// DELETE /api/v1/notices/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if NoticeRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(notice_id = id, "Notice deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Notice",
            id,
        }))
    }
}
