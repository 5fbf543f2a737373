//! Notice entity model and DTOs.

use serde::{Deserialize, Serialize};
use signage_core::ids;
use signage_core::status::{compute_status, ContentStatus};
use signage_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// A notice row from the `notices` table.
///
/// `expires_on = None` means the notice never expires.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notice {
    pub id: DbId,
    pub manager_id: Option<DbId>,
    pub name: String,
    pub message: String,
    pub condominium_ids: Vec<DbId>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub expires_on: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Notice {
    pub fn status_on(&self, reference: Date) -> ContentStatus {
        compute_status(self.expires_on, reference)
    }
}

/// DTO for creating a new notice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotice {
    pub manager_id: Option<DbId>,
    pub name: String,
    pub message: String,
    #[serde(default, deserialize_with = "ids::lenient")]
    pub condominium_ids: Vec<DbId>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    /// Blank or absent means the notice never expires.
    pub expires_on: Option<String>,
}

/// DTO for updating an existing notice. All fields are optional.
///
/// `expires_on: ""` clears the expiration.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotice {
    pub manager_id: Option<DbId>,
    pub name: Option<String>,
    pub message: Option<String>,
    #[serde(default, deserialize_with = "ids::lenient_option")]
    pub condominium_ids: Option<Vec<DbId>>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub expires_on: Option<String>,
}

/// Validated values written by `NoticeRepo::create`.
#[derive(Debug, Clone)]
pub struct NewNotice {
    pub manager_id: Option<DbId>,
    pub name: String,
    pub message: String,
    pub condominium_ids: Vec<DbId>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub expires_on: Option<Date>,
}

/// Validated changes applied by `NoticeRepo::update`.
///
/// `expires_on`: `None` keeps the stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct NoticeChanges {
    pub manager_id: Option<DbId>,
    pub name: Option<String>,
    pub message: Option<String>,
    pub condominium_ids: Option<Vec<DbId>>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub expires_on: Option<Option<Date>>,
}
