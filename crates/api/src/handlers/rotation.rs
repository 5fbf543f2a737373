//! Handlers for TV rotation settings and previews.
//!
//! A preview is the playback order a TV would cycle through, cut at a
//! maximum length. Stored TVs use the server's configured length; the
//! stateless endpoint accepts its own.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use signage_core::error::CoreError;
use signage_core::layout::{layout_supports_news, validate_template, DEFAULT_TEMPLATE};
use signage_core::rotation::{
    clamp_preview_length, describe, is_truncated, plan_rotation, PlaybackSlot, RotationConfig,
    RotationPreset, DEFAULT_AD_QUOTA, DEFAULT_MAX_PREVIEW_LENGTH, DEFAULT_NEWS_QUOTA,
    DEFAULT_NOTICE_QUOTA,
};
use signage_core::types::DbId;
use signage_db::models::tv::{Tv, UpdateRotation};
use signage_db::repositories::{AdRepo, NoticeRepo, TvRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_tv_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// A TV's stored rotation settings.
#[derive(Debug, Serialize)]
pub struct TvRotation {
    pub tv_id: DbId,
    pub template: String,
    pub supports_news: bool,
    pub config: RotationConfig,
    pub description: String,
}

impl TvRotation {
    fn from_tv(tv: &Tv) -> Self {
        let config = tv.rotation_config();
        let supports_news = tv.supports_news();
        Self {
            tv_id: tv.id,
            template: tv.template.clone(),
            supports_news,
            config,
            description: describe(&config, supports_news),
        }
    }
}

/// A planned playback sequence.
#[derive(Debug, Serialize)]
pub struct RotationPreview {
    pub config: RotationConfig,
    pub supports_news: bool,
    pub description: String,
    pub max_length: usize,
    /// True when the sequence reached `max_length`.
    pub truncated: bool,
    pub slots: Vec<PlaybackSlot>,
    /// `Notice-1`, `Ad-3`, ... in playback order.
    pub labels: Vec<String>,
}

impl RotationPreview {
    fn plan(config: RotationConfig, supports_news: bool, max_length: usize) -> Self {
        let slots = plan_rotation(&config, supports_news, max_length);
        Self {
            config,
            supports_news,
            description: describe(&config, supports_news),
            max_length,
            truncated: is_truncated(&slots, max_length),
            labels: slots.iter().map(PlaybackSlot::label).collect(),
            slots,
        }
    }
}

/// Preview of a stored TV plus how much content is currently eligible for it.
#[derive(Debug, Serialize)]
pub struct TvRotationPreview {
    pub tv_id: DbId,
    pub condominium_id: DbId,
    #[serde(flatten)]
    pub preview: RotationPreview,
    /// Active notices targeting the TV's condominium.
    pub eligible_notices: usize,
    /// Active ads targeting the TV's condominium.
    pub eligible_ads: usize,
}

/// Body of the stateless preview endpoint. Omitted quotas use 1:5:3.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub notice_quota: Option<i64>,
    pub ad_quota: Option<i64>,
    pub news_quota: Option<i64>,
    pub template: Option<String>,
    /// Clamped to `1..=100`; defaults to 12.
    pub max_length: Option<i64>,
}

/// One row of the preset table.
#[derive(Debug, Serialize)]
pub struct PresetView {
    pub key: RotationPreset,
    pub name: &'static str,
    pub config: RotationConfig,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Stored TV rotation
// ---------------------------------------------------------------------------

/// GET /api/v1/tvs/{id}/rotation
pub async fn get_for_tv(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tv = ensure_tv_exists(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: TvRotation::from_tv(&tv),
    }))
}

/// PUT /api/v1/tvs/{id}/rotation
///
/// Quotas are clamped into `0..=999` before being stored.
pub async fn update_for_tv(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRotation>,
) -> AppResult<impl IntoResponse> {
    let config = input.to_config();
    let tv = TvRepo::update_rotation(&state.pool, id, &config)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "TV", id }))?;
    tracing::info!(
        tv_id = id,
        notice_quota = config.notice_quota,
        ad_quota = config.ad_quota,
        news_quota = config.news_quota,
        "TV rotation updated"
    );
    Ok(Json(DataResponse {
        data: TvRotation::from_tv(&tv),
    }))
}

/// GET /api/v1/tvs/{id}/rotation/preview
pub async fn preview_for_tv(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tv = ensure_tv_exists(&state.pool, id).await?;
    let today = state.clock.today();

    let eligible_notices = NoticeRepo::list(&state.pool, Some(tv.condominium_id))
        .await?
        .iter()
        .filter(|notice| notice.status_on(today).is_active())
        .count();
    let eligible_ads = AdRepo::list(&state.pool, Some(tv.condominium_id))
        .await?
        .iter()
        .filter(|ad| ad.status_on(today).is_active())
        .count();

    let preview = RotationPreview::plan(
        tv.rotation_config(),
        tv.supports_news(),
        state.config.rotation_preview_length,
    );
    tracing::debug!(tv_id = id, slots = preview.slots.len(), "Planned TV rotation preview");

    Ok(Json(DataResponse {
        data: TvRotationPreview {
            tv_id: tv.id,
            condominium_id: tv.condominium_id,
            preview,
            eligible_notices,
            eligible_ads,
        },
    }))
}

// ---------------------------------------------------------------------------
// Stateless tools
// ---------------------------------------------------------------------------

/// POST /api/v1/rotation/preview
pub async fn preview(Json(input): Json<PreviewRequest>) -> AppResult<impl IntoResponse> {
    let template = input.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
    validate_template(template)?;

    let config = RotationConfig::clamped(
        input
            .notice_quota
            .unwrap_or(i64::from(DEFAULT_NOTICE_QUOTA)),
        input.ad_quota.unwrap_or(i64::from(DEFAULT_AD_QUOTA)),
        input.news_quota.unwrap_or(i64::from(DEFAULT_NEWS_QUOTA)),
    );
    let max_length = input
        .max_length
        .map(clamp_preview_length)
        .unwrap_or(DEFAULT_MAX_PREVIEW_LENGTH);

    Ok(Json(DataResponse {
        data: RotationPreview::plan(config, layout_supports_news(template), max_length),
    }))
}

/// GET /api/v1/rotation/presets
///
/// Descriptions assume a layout with a news strip.
pub async fn list_presets() -> impl IntoResponse {
    let presets: Vec<PresetView> = RotationPreset::ALL
        .iter()
        .map(|preset| {
            let config = preset.config();
            PresetView {
                key: *preset,
                name: preset.name(),
                config,
                description: describe(&config, true),
            }
        })
        .collect();
    Json(DataResponse { data: presets })
}
