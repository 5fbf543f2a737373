//! Handlers for the `/tvs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use signage_core::connection_code::{generate_connection_code, validate_connection_code};
use signage_core::content::validate_title;
use signage_core::error::CoreError;
use signage_core::layout::{validate_template, DEFAULT_TEMPLATE};
use signage_core::rotation::{
    RotationConfig, DEFAULT_AD_QUOTA, DEFAULT_NEWS_QUOTA, DEFAULT_NOTICE_QUOTA,
};
use signage_core::types::DbId;
use signage_db::models::tv::{CreateTv, UpdateTv};
use signage_db::repositories::tv_repo::NewTv;
use signage_db::repositories::TvRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_condominium_exists, ensure_tv_exists, validate_optional_title};
use crate::query::CondominiumFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Random codes tried before giving up on finding a free one.
const MAX_CODE_ATTEMPTS: usize = 20;

/// Generate a connection code no live TV is using.
async fn unused_connection_code(pool: &sqlx::PgPool) -> AppResult<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_connection_code();
        if TvRepo::find_by_connection_code(pool, &code).await?.is_none() {
            return Ok(code);
        }
    }
    Err(AppError::Core(CoreError::Conflict(
        "Could not allocate a free connection code".to_string(),
    )))
}

/// GET /api/v1/tvs
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CondominiumFilterParams>,
) -> AppResult<impl IntoResponse> {
    let tvs = TvRepo::list(&state.pool, params.condominium_id).await?;
    tracing::debug!(count = tvs.len(), "Listed TVs");
    Ok(Json(DataResponse { data: tvs }))
}

/// POST /api/v1/tvs
///
/// Missing connection code, template, connectivity and quotas fall back to
/// a generated code, `Template 1`, `offline` and 1:5:3.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTv>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.name, "name")?;
    ensure_condominium_exists(&state.pool, input.condominium_id).await?;

    let template = input
        .template
        .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());
    validate_template(&template)?;

    let connection_code = match input.connection_code {
        Some(code) => {
            validate_connection_code(&code)?;
            code
        }
        None => unused_connection_code(&state.pool).await?,
    };

    let rotation = RotationConfig::clamped(
        input
            .notice_quota
            .unwrap_or(i64::from(DEFAULT_NOTICE_QUOTA)),
        input.ad_quota.unwrap_or(i64::from(DEFAULT_AD_QUOTA)),
        input.news_quota.unwrap_or(i64::from(DEFAULT_NEWS_QUOTA)),
    );

    let new_tv = NewTv {
        condominium_id: input.condominium_id,
        name: input.name,
        connection_code,
        template,
        connectivity: input.connectivity.unwrap_or_default().as_str(),
        rotation,
    };
    let tv = TvRepo::create(&state.pool, &new_tv).await?;
    tracing::info!(
        tv_id = tv.id,
        condominium_id = tv.condominium_id,
        "TV created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: tv })))
}

/// GET /api/v1/tvs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tv = ensure_tv_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tv }))
}

/// PUT /api/v1/tvs/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTv>,
) -> AppResult<impl IntoResponse> {
    validate_optional_title(input.name.as_deref(), "name")?;
    if let Some(template) = &input.template {
        validate_template(template)?;
    }
    if let Some(code) = &input.connection_code {
        validate_connection_code(code)?;
    }
    if let Some(condominium_id) = input.condominium_id {
        ensure_condominium_exists(&state.pool, condominium_id).await?;
    }

    let tv = TvRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "TV", id }))?;
    tracing::info!(tv_id = id, "TV updated");
    Ok(Json(DataResponse { data: tv }))
}

/// DELETE /api/v1/tvs/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if TvRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(tv_id = id, "TV deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "TV", id }))
    }
}

/// POST /api/v1/tvs/{id}/connection-code
///
/// Replaces the TV's connection code with a fresh random one.
pub async fn regenerate_connection_code(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_tv_exists(&state.pool, id).await?;
    let code = unused_connection_code(&state.pool).await?;

    let tv = TvRepo::set_connection_code(&state.pool, id, &code)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "TV", id }))?;
    tracing::info!(tv_id = id, "TV connection code regenerated");
    Ok(Json(DataResponse { data: tv }))
}
