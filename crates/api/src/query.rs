//! Shared query parameter types for API handlers.

use serde::Deserialize;
use signage_core::error::CoreError;
use signage_core::status::ContentStatus;
use signage_core::types::DbId;

/// `?condominium_id=` filter for TV listing.
#[derive(Debug, Deserialize)]
pub struct CondominiumFilterParams {
    pub condominium_id: Option<DbId>,
}

/// Filters accepted by the ad and notice list endpoints.
#[derive(Debug, Deserialize)]
pub struct ContentFilterParams {
    pub condominium_id: Option<DbId>,
    /// `active` or `inactive`; evaluated against the server clock.
    pub status: Option<String>,
}

impl ContentFilterParams {
    /// Parse the `status` filter, rejecting unknown values.
    pub fn status(&self) -> Result<Option<ContentStatus>, CoreError> {
        self.status
            .as_deref()
            .map(ContentStatus::from_str_value)
            .transpose()
    }
}

/// `?role=` filter for user listing.
#[derive(Debug, Deserialize)]
pub struct RoleFilterParams {
    pub role: Option<String>,
}
