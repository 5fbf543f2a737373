//! TV content rotation: quotas per cycle and the playback preview.
//!
//! Each TV carries three quotas (notices, ads, news). The planner turns them
//! into an ordered, capped sequence of [`PlaybackSlot`]s. Notices are emitted
//! as one block, then ads, then news (news only on layouts with a news strip).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default number of slots shown in a preview.
pub const DEFAULT_MAX_PREVIEW_LENGTH: usize = 12;

/// Largest accepted preview length for ad-hoc preview requests.
pub const MAX_PREVIEW_LENGTH_LIMIT: usize = 100;

/// Upper bound for any single quota.
pub const MAX_QUOTA: u32 = 999;

pub const DEFAULT_NOTICE_QUOTA: u32 = 1;
pub const DEFAULT_AD_QUOTA: u32 = 5;
pub const DEFAULT_NEWS_QUOTA: u32 = 3;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Items of each kind shown per playback cycle on one TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    pub notice_quota: u32,
    pub ad_quota: u32,
    pub news_quota: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            notice_quota: DEFAULT_NOTICE_QUOTA,
            ad_quota: DEFAULT_AD_QUOTA,
            news_quota: DEFAULT_NEWS_QUOTA,
        }
    }
}

impl RotationConfig {
    pub fn new(notice_quota: u32, ad_quota: u32, news_quota: u32) -> Self {
        Self {
            notice_quota,
            ad_quota,
            news_quota,
        }
    }

    /// Build a config from untrusted integers, clamping each into `0..=MAX_QUOTA`.
    pub fn clamped(notice_quota: i64, ad_quota: i64, news_quota: i64) -> Self {
        Self {
            notice_quota: clamp_quota(notice_quota),
            ad_quota: clamp_quota(ad_quota),
            news_quota: clamp_quota(news_quota),
        }
    }

    /// True when no slot would ever be produced, whatever the layout.
    pub fn is_empty(&self) -> bool {
        self.notice_quota == 0 && self.ad_quota == 0 && self.news_quota == 0
    }
}

/// Clamp a raw quota into `0..=MAX_QUOTA`.
pub fn clamp_quota(value: i64) -> u32 {
    // The clamp keeps the value inside u32 range.
    value.clamp(0, i64::from(MAX_QUOTA)) as u32
}

/// Clamp a requested preview length into `1..=MAX_PREVIEW_LENGTH_LIMIT`.
pub fn clamp_preview_length(value: i64) -> usize {
    value.clamp(1, MAX_PREVIEW_LENGTH_LIMIT as i64) as usize
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Content kind occupying a playback slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Notice,
    Ad,
    News,
}

impl SlotKind {
    pub fn label_prefix(&self) -> &'static str {
        match self {
            Self::Notice => "Notice",
            Self::Ad => "Ad",
            Self::News => "News",
        }
    }
}

/// One position in a playback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSlot {
    pub kind: SlotKind,
    /// 1-based position of this item within its kind.
    pub ordinal: u32,
}

impl PlaybackSlot {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlaybackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.label_prefix(), self.ordinal)
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Produce the playback sequence for `config`, at most `max_len` slots long.
///
/// Notices and ads are emitted in whole blocks: every notice first, then every
/// ad. The cap is checked before each emission. News slots are appended
/// after that block only when `layout_supports_news` is set.
pub fn plan_rotation(
    config: &RotationConfig,
    layout_supports_news: bool,
    max_len: usize,
) -> Vec<PlaybackSlot> {
    let total = [config.notice_quota, config.ad_quota, config.news_quota]
        .iter()
        .fold(0usize, |acc, &q| acc.saturating_add(q as usize));
    let mut sequence = Vec::with_capacity(max_len.min(total));

    let mut notice_idx = 0;
    let mut ad_idx = 0;

    while (notice_idx < config.notice_quota || ad_idx < config.ad_quota) && sequence.len() < max_len
    {
        while notice_idx < config.notice_quota && sequence.len() < max_len {
            notice_idx += 1;
            sequence.push(PlaybackSlot {
                kind: SlotKind::Notice,
                ordinal: notice_idx,
            });
        }
        while ad_idx < config.ad_quota && sequence.len() < max_len {
            ad_idx += 1;
            sequence.push(PlaybackSlot {
                kind: SlotKind::Ad,
                ordinal: ad_idx,
            });
        }
    }

    if layout_supports_news && config.news_quota > 0 {
        let remaining = max_len.saturating_sub(sequence.len());
        let news_count = (config.news_quota as usize).min(remaining);
        sequence.extend((1..=news_count as u32).map(|ordinal| PlaybackSlot {
            kind: SlotKind::News,
            ordinal,
        }));
    }

    sequence
}

/// [`plan_rotation`] with the default preview cap.
pub fn plan_preview(config: &RotationConfig, layout_supports_news: bool) -> Vec<PlaybackSlot> {
    plan_rotation(config, layout_supports_news, DEFAULT_MAX_PREVIEW_LENGTH)
}

/// Whether a preview reached its cap. A preview that exactly fills the cap
/// counts, since the real rotation may continue past it.
pub fn is_truncated(preview: &[PlaybackSlot], max_len: usize) -> bool {
    preview.len() >= max_len
}

/// Human-readable ratio, e.g. `1 notice(s) : 5 ad(s) : 3 news`.
pub fn describe(config: &RotationConfig, layout_supports_news: bool) -> String {
    let mut parts = Vec::new();
    if config.notice_quota > 0 {
        parts.push(format!("{} notice(s)", config.notice_quota));
    }
    if config.ad_quota > 0 {
        parts.push(format!("{} ad(s)", config.ad_quota));
    }
    if layout_supports_news && config.news_quota > 0 {
        parts.push(format!("{} news", config.news_quota));
    }

    if parts.is_empty() {
        "No content configured".to_string()
    } else {
        parts.join(" : ")
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named ratios offered to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPreset {
    Standard,
    Commercial,
    Balanced,
    NoticesOnly,
}

impl RotationPreset {
    pub const ALL: [RotationPreset; 4] = [
        Self::Standard,
        Self::Commercial,
        Self::Balanced,
        Self::NoticesOnly,
    ];

    pub fn config(&self) -> RotationConfig {
        match self {
            Self::Standard => RotationConfig::new(1, 5, 3),
            Self::Commercial => RotationConfig::new(1, 10, 2),
            Self::Balanced => RotationConfig::new(3, 5, 5),
            Self::NoticesOnly => RotationConfig::new(1, 0, 0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Commercial => "Commercial",
            Self::Balanced => "Balanced",
            Self::NoticesOnly => "Notices only",
        }
    }
}
