//! Normalization of ID lists.
//!
//! Ads and notices target one or more condominiums. Clients have sent that
//! relation as `"1,2,3"`, as a JSON-encoded string `"[1,2,3]"`, or as a
//! native array. Everything is turned into an ordered, de-duplicated
//! `Vec<DbId>` here so nothing past the boundary has to care.

use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::DbId;

/// Parse an ID list from its textual forms.
///
/// Non-numeric fragments are dropped. Order of first appearance is kept and
/// duplicates are removed.
pub fn parse_id_list(raw: &str) -> Vec<DbId> {
    let trimmed = raw.trim();

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(ids) = serde_json::from_str::<Vec<DbId>>(trimmed) {
            return dedup_preserving_order(ids);
        }
    }

    let body = trimmed.trim_start_matches('[').trim_end_matches(']');
    let ids = body
        .split(',')
        .filter_map(|part| part.trim().trim_matches('"').parse::<DbId>().ok())
        .collect();
    dedup_preserving_order(ids)
}

/// Remove repeated IDs, keeping the first occurrence.
pub fn dedup_preserving_order(ids: Vec<DbId>) -> Vec<DbId> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Require at least one ID and only positive IDs.
pub fn validate_id_list(ids: &[DbId], field: &str) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation(format!(
            "{field} must contain at least one id"
        )));
    }
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(CoreError::Validation(format!(
            "{field} contains invalid id {bad}"
        )));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdList {
    List(Vec<DbId>),
    Text(String),
}

impl RawIdList {
    fn normalize(self) -> Vec<DbId> {
        match self {
            Self::List(ids) => dedup_preserving_order(ids),
            Self::Text(text) => parse_id_list(&text),
        }
    }
}

/// `#[serde(deserialize_with = "ids::lenient")]` for `Vec<DbId>` fields.
///
/// Accepts an array, either textual form, or `null` (empty list).
pub fn lenient<'de, D>(deserializer: D) -> Result<Vec<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawIdList>::deserialize(deserializer)?;
    Ok(raw.map(RawIdList::normalize).unwrap_or_default())
}

/// Same as [`lenient`] for optional fields, keeping `null`/absent as `None`.
pub fn lenient_option<'de, D>(deserializer: D) -> Result<Option<Vec<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawIdList>::deserialize(deserializer)?;
    Ok(raw.map(RawIdList::normalize))
}
