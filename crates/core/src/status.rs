//! Display eligibility of ads and notices.
//!
//! Status is never stored. It is derived from the optional expiration date
//! every time an item is read, compared against a reference date supplied by
//! a [`Clock`]. Comparisons are calendar-date only, so an item expiring
//! "today" stays active through the whole day.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// All valid status strings.
pub const VALID_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_INACTIVE];

/// Date-time layouts accepted by [`parse_expiration`] after plain dates and RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Whether an ad or notice is eligible for rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Active,
    Inactive,
}

impl ContentStatus {
    /// Convert from a query-string or stored value.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_INACTIVE => Ok(Self::Inactive),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Inactive => STATUS_INACTIVE,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Derive the status of an item from its expiration date.
///
/// `None` means the item never expires. Otherwise the item is active while
/// `expiration >= reference`.
pub fn compute_status(expiration: Option<Date>, reference: Date) -> ContentStatus {
    match expiration {
        Some(expires_on) if expires_on < reference => ContentStatus::Inactive,
        _ => ContentStatus::Active,
    }
}

/// [`compute_status`] against the clock's current date.
pub fn compute_status_now(expiration: Option<Date>, clock: &dyn Clock) -> ContentStatus {
    compute_status(expiration, clock.today())
}

/// Truncate a timestamp to its calendar date in its own time zone.
pub fn expiration_date_of<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Date {
    timestamp.date_naive()
}

/// Parse an expiration value leniently.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]`.
/// Blank or unparseable input yields `None`, which [`compute_status`] treats
/// as "never expires".
pub fn parse_expiration(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = Date::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(expiration_date_of(&ts));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse an expiration value arriving in a write request.
///
/// Unlike [`parse_expiration`] this refuses non-blank input it cannot read,
/// so malformed dates are never persisted as "never expires". Blank input is
/// `Ok(None)`.
pub fn parse_expiration_input(raw: &str) -> Result<Option<Date>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_expiration(raw)
        .map(Some)
        .ok_or_else(|| CoreError::Validation(format!("Invalid expiration date '{raw}'")))
}

/// Reject an expiration date that already lies in the past.
///
/// Same-day expirations are accepted.
pub fn validate_expiration_not_past(
    expiration: Option<Date>,
    reference: Date,
) -> Result<(), CoreError> {
    match expiration {
        Some(expires_on) if expires_on < reference => Err(CoreError::Validation(format!(
            "Expiration date {expires_on} cannot be earlier than {reference}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of the reference date used for status derivation.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock in the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
