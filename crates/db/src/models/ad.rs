//! Ad entity model and DTOs.

use serde::{Deserialize, Serialize};
use signage_core::ids;
use signage_core::status::{compute_status, ContentStatus};
use signage_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// An ad row from the `ads` table.
///
/// There is no status column; use [`Ad::status_on`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ad {
    pub id: DbId,
    pub name: String,
    pub advertiser_name: String,
    pub advertiser_phone: String,
    pub condominium_ids: Vec<DbId>,
    pub expires_on: Date,
    pub archive_url: Option<String>,
    pub display_seconds: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ad {
    pub fn status_on(&self, reference: Date) -> ContentStatus {
        compute_status(Some(self.expires_on), reference)
    }
}

/// DTO for creating a new ad.
///
/// `expires_on` arrives as text and is parsed by the handler. Any `status`
/// sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAd {
    pub name: String,
    pub advertiser_name: String,
    pub advertiser_phone: String,
    #[serde(default, deserialize_with = "ids::lenient")]
    pub condominium_ids: Vec<DbId>,
    pub expires_on: String,
    pub archive_url: Option<String>,
    /// Defaults to 10 seconds if omitted.
    pub display_seconds: Option<i32>,
}

/// DTO for updating an existing ad. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAd {
    pub name: Option<String>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    #[serde(default, deserialize_with = "ids::lenient_option")]
    pub condominium_ids: Option<Vec<DbId>>,
    pub expires_on: Option<String>,
    pub archive_url: Option<String>,
    pub display_seconds: Option<i32>,
}

/// Validated values written by `AdRepo::create`.
#[derive(Debug, Clone)]
pub struct NewAd {
    pub name: String,
    pub advertiser_name: String,
    pub advertiser_phone: String,
    pub condominium_ids: Vec<DbId>,
    pub expires_on: Date,
    pub archive_url: Option<String>,
    pub display_seconds: i32,
}

/// Validated changes applied by `AdRepo::update`. `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct AdChanges {
    pub name: Option<String>,
    pub advertiser_name: Option<String>,
    pub advertiser_phone: Option<String>,
    pub condominium_ids: Option<Vec<DbId>>,
    pub expires_on: Option<Date>,
    pub archive_url: Option<String>,
    pub display_seconds: Option<i32>,
}
