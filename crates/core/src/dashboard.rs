//! Aggregate figures for the console landing page.

use serde::Serialize;

use crate::status::{compute_status, ContentStatus};
use crate::types::Date;

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AdStats {
    pub total_condominiums: i64,
    pub total_ads: i64,
    pub active_ads: i64,
    pub expired_ads: i64,
}

/// Summarize ads by derived status at `reference`.
///
/// `expirations` holds one entry per ad. Active and expired always add up to
/// the total since status is derived from the date alone.
pub fn summarize_ads<I>(total_condominiums: i64, expirations: I, reference: Date) -> AdStats
where
    I: IntoIterator<Item = Option<Date>>,
{
    expirations.into_iter().fold(
        AdStats {
            total_condominiums,
            ..AdStats::default()
        },
        |mut stats, expires_on| {
            stats.total_ads += 1;
            match compute_status(expires_on, reference) {
                ContentStatus::Active => stats.active_ads += 1,
                ContentStatus::Inactive => stats.expired_ads += 1,
            }
            stats
        },
    )
}
