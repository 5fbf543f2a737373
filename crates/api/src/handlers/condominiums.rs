//! Handlers for the `/condominiums` resource.
//!
//! CEPs are stored as bare digits and returned formatted (`12345-678`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use signage_core::cep::{format_cep, normalize_cep};
use signage_core::content::validate_title;
use signage_core::error::CoreError;
use signage_core::types::DbId;
use signage_db::models::ad::Ad;
use signage_db::models::condominium::{Condominium, CreateCondominium, UpdateCondominium};
use signage_db::models::tv::Tv;
use signage_db::models::user::User;
use signage_db::repositories::{AdRepo, CondominiumRepo, TvRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{
    decorate_with_status, ensure_condominium_exists, ensure_user_exists, validate_optional_title,
};
use crate::response::{DataResponse, WithStatus};
use crate::state::AppState;

/// Everything the console shows on a condominium's page.
#[derive(Debug, Serialize)]
pub struct CondominiumDetail {
    pub condominium: Condominium,
    pub manager: Option<User>,
    pub tvs: Vec<Tv>,
    pub ads: Vec<WithStatus<Ad>>,
}

fn with_formatted_cep(mut condominium: Condominium) -> Condominium {
    condominium.cep = format_cep(&condominium.cep);
    condominium
}

/// GET /api/v1/users/{id}/condominiums
///
/// The condominiums a manager is responsible for.
pub async fn list_by_manager(
    State(state): State<AppState>,
    Path(manager_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_user_exists(&state.pool, manager_id).await?;
    let items: Vec<Condominium> = CondominiumRepo::list_by_manager(&state.pool, manager_id)
        .await?
        .into_iter()
        .map(with_formatted_cep)
        .collect();
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/condominiums
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut items = CondominiumRepo::list_with_tv_count(&state.pool).await?;
    for item in &mut items {
        item.cep = format_cep(&item.cep);
    }
    tracing::debug!(count = items.len(), "Listed condominiums");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/condominiums
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateCondominium>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.name, "name")?;
    validate_title(&input.location, "location")?;
    input.cep = normalize_cep(&input.cep)?;
    if let Some(manager_id) = input.manager_id {
        ensure_user_exists(&state.pool, manager_id).await?;
    }

    let condominium = CondominiumRepo::create(&state.pool, &input).await?;
    tracing::info!(
        condominium_id = condominium.id,
        name = %condominium.name,
        "Condominium created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: with_formatted_cep(condominium),
        }),
    ))
}

/// GET /api/v1/condominiums/{id}
///
/// Returns the condominium with its manager, TVs and targeted ads.
pub async fn get_detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let condominium = ensure_condominium_exists(&state.pool, id).await?;

    let manager = match condominium.manager_id {
        Some(manager_id) => UserRepo::find_by_id(&state.pool, manager_id).await?,
        None => None,
    };
    let tvs = TvRepo::list(&state.pool, Some(id)).await?;
    let ads = AdRepo::list(&state.pool, Some(id)).await?;
    let today = state.clock.today();

    Ok(Json(DataResponse {
        data: CondominiumDetail {
            condominium: with_formatted_cep(condominium),
            manager,
            tvs,
            ads: decorate_with_status(ads, |ad| ad.status_on(today), None),
        },
    }))
}

/// PUT /api/v1/condominiums/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCondominium>,
) -> AppResult<impl IntoResponse> {
    validate_optional_title(input.name.as_deref(), "name")?;
    validate_optional_title(input.location.as_deref(), "location")?;
    input.cep = input.cep.as_deref().map(normalize_cep).transpose()?;
    if let Some(manager_id) = input.manager_id {
        ensure_user_exists(&state.pool, manager_id).await?;
    }

    let condominium = CondominiumRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Condominium",
            id,
        }))?;
    tracing::info!(condominium_id = id, "Condominium updated");
    Ok(Json(DataResponse {
        data: with_formatted_cep(condominium),
    }))
}

/// DELETE /api/v1/condominiums/{id}
///
/// Also removes the condominium's TVs.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CondominiumRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(condominium_id = id, "Condominium deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Condominium",
            id,
        }))
    }
}
