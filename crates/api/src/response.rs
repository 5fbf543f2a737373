//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;
use signage_core::status::ContentStatus;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// An entity with its display status derived at response time.
///
/// Serializes as the entity's own fields plus `"status"`.
#[derive(Debug, Serialize)]
pub struct WithStatus<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    pub status: ContentStatus,
}
