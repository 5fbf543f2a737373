//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use signage_core::error::CoreError;
use signage_core::types::DbId;
use signage_core::user::{validate_user_fields, UserFields, UserRole, DEFAULT_NOTICE_LIMIT};
use signage_db::models::user::{CreateUser, UpdateUser};
use signage_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_user_exists;
use crate::query::RoleFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RoleFilterParams>,
) -> AppResult<impl IntoResponse> {
    let role = params
        .role
        .as_deref()
        .map(UserRole::from_str_value)
        .transpose()?;
    let users = UserRepo::list(&state.pool, role).await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    validate_user_fields(&UserFields {
        name: input.name.clone(),
        email: input.email.clone(),
        notice_limit: input.notice_limit.unwrap_or(DEFAULT_NOTICE_LIMIT),
    })?;

    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = ensure_user_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/{id}
///
/// The merged result is validated, so a partial update cannot leave the row
/// in a state create would have refused.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_user_exists(&state.pool, id).await?;
    validate_user_fields(&UserFields {
        name: input.name.clone().unwrap_or(existing.name),
        email: input.email.clone().unwrap_or(existing.email),
        notice_limit: input.notice_limit.unwrap_or(existing.notice_limit),
    })?;

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    tracing::info!(user_id = id, "User updated");
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if UserRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(user_id = id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
