//! Handlers for the `/ads` resource.
//!
//! Ads always carry an expiration date. Their `status` is derived from it on
//! every read and never accepted from the client.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use signage_core::content::{validate_display_seconds, validate_title, DEFAULT_DISPLAY_SECONDS};
use signage_core::error::CoreError;
use signage_core::ids::validate_id_list;
use signage_core::status::{parse_expiration_input, validate_expiration_not_past};
use signage_core::types::{Date, DbId};
use signage_db::models::ad::{AdChanges, CreateAd, NewAd, UpdateAd};
use signage_db::repositories::AdRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{decorate_with_status, ensure_condominiums_exist, validate_optional_title};
use crate::query::ContentFilterParams;
use crate::response::{DataResponse, WithStatus};
use crate::state::AppState;

/// Parse a required ad expiration and refuse past dates.
fn required_expiration(raw: &str, today: Date) -> AppResult<Date> {
    let expires_on = parse_expiration_input(raw)?.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "expires_on is required for ads".to_string(),
        ))
    })?;
    validate_expiration_not_past(Some(expires_on), today)?;
    Ok(expires_on)
}

/// GET /api/v1/ads
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ContentFilterParams>,
) -> AppResult<impl IntoResponse> {
    let wanted = params.status()?;
    let ads = AdRepo::list(&state.pool, params.condominium_id).await?;
    let today = state.clock.today();

    let items = decorate_with_status(ads, |ad| ad.status_on(today), wanted);
    tracing::debug!(count = items.len(), "Listed ads");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/ads
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAd>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();

    validate_title(&input.name, "name")?;
    validate_title(&input.advertiser_name, "advertiser_name")?;
    validate_title(&input.advertiser_phone, "advertiser_phone")?;
    validate_id_list(&input.condominium_ids, "condominium_ids")?;
    let display_seconds = input.display_seconds.unwrap_or(DEFAULT_DISPLAY_SECONDS);
    validate_display_seconds(display_seconds)?;
    let expires_on = required_expiration(&input.expires_on, today)?;
    ensure_condominiums_exist(&state.pool, &input.condominium_ids).await?;

    let new_ad = NewAd {
        name: input.name,
        advertiser_name: input.advertiser_name,
        advertiser_phone: input.advertiser_phone,
        condominium_ids: input.condominium_ids,
        expires_on,
        archive_url: input.archive_url,
        display_seconds,
    };
    let ad = AdRepo::create(&state.pool, &new_ad).await?;
    tracing::info!(ad_id = ad.id, expires_on = %ad.expires_on, "Ad created");

    let status = ad.status_on(today);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: WithStatus { item: ad, status },
        }),
    ))
}

/// GET /api/v1/ads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ad = AdRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ad", id }))?;
    let status = ad.status_on(state.clock.today());
    Ok(Json(DataResponse {
        data: WithStatus { item: ad, status },
    }))
}

/// PUT /api/v1/ads/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAd>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();

    validate_optional_title(input.name.as_deref(), "name")?;
    validate_optional_title(input.advertiser_name.as_deref(), "advertiser_name")?;
    validate_optional_title(input.advertiser_phone.as_deref(), "advertiser_phone")?;
    if let Some(ids) = &input.condominium_ids {
        validate_id_list(ids, "condominium_ids")?;
        ensure_condominiums_exist(&state.pool, ids).await?;
    }
    if let Some(seconds) = input.display_seconds {
        validate_display_seconds(seconds)?;
    }
    let expires_on = input
        .expires_on
        .as_deref()
        .map(|raw| required_expiration(raw, today))
        .transpose()?;

    let changes = AdChanges {
        name: input.name,
        advertiser_name: input.advertiser_name,
        advertiser_phone: input.advertiser_phone,
        condominium_ids: input.condominium_ids,
        expires_on,
        archive_url: input.archive_url,
        display_seconds: input.display_seconds,
    };
    let ad = AdRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ad", id }))?;
    tracing::info!(ad_id = id, "Ad updated");

    let status = ad.status_on(today);
    Ok(Json(DataResponse {
        data: WithStatus { item: ad, status },
    }))
}

/// DELETE /api/v1/ads/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if AdRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(ad_id = id, "Ad deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Ad", id }))
    }
}
