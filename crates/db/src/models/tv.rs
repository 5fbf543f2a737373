//! TV display entity model and DTOs.

use serde::{Deserialize, Serialize};
use signage_core::connection_code::TvConnectivity;
use signage_core::layout::layout_supports_news;
use signage_core::rotation::RotationConfig;
use signage_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A TV row from the `tvs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tv {
    pub id: DbId,
    pub condominium_id: DbId,
    pub name: String,
    pub connection_code: String,
    pub template: String,
    /// `"online"` or `"offline"`.
    pub connectivity: String,
    pub notice_quota: i32,
    pub ad_quota: i32,
    pub news_quota: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tv {
    /// The stored quotas as a rotation config.
    pub fn rotation_config(&self) -> RotationConfig {
        RotationConfig::clamped(
            i64::from(self.notice_quota),
            i64::from(self.ad_quota),
            i64::from(self.news_quota),
        )
    }

    /// Whether this TV's layout shows a news strip.
    pub fn supports_news(&self) -> bool {
        layout_supports_news(&self.template)
    }
}

/// DTO for creating a new TV.
///
/// A connection code is generated when omitted. Quotas default to 1:5:3.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTv {
    pub condominium_id: DbId,
    pub name: String,
    pub connection_code: Option<String>,
    pub template: Option<String>,
    pub connectivity: Option<TvConnectivity>,
    pub notice_quota: Option<i64>,
    pub ad_quota: Option<i64>,
    pub news_quota: Option<i64>,
}

/// DTO for updating an existing TV. All fields are optional.
///
/// Quotas are changed through [`UpdateRotation`].
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTv {
    pub condominium_id: Option<DbId>,
    pub name: Option<String>,
    pub connection_code: Option<String>,
    pub template: Option<String>,
    pub connectivity: Option<TvConnectivity>,
}

/// DTO for replacing a TV's rotation quotas. Negative values are clamped to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRotation {
    pub notice_quota: i64,
    pub ad_quota: i64,
    pub news_quota: i64,
}

impl UpdateRotation {
    pub fn to_config(&self) -> RotationConfig {
        RotationConfig::clamped(self.notice_quota, self.ad_quota, self.news_quota)
    }
}
