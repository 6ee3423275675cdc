//! Cutoff and run mode.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::asset::Asset;

/// `now - days`. Assets whose end date is strictly earlier are expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cutoff(DateTime<Utc>);

impl Cutoff {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// chrono の範囲を超える日数は最小時刻に丸める（何も期限切れにならない）
    pub fn days_before(now: DateTime<Utc>, days: u32) -> Self {
        let at = Duration::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self(at)
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.0
    }

    /// Strict less-than: an asset ending exactly at the cutoff is current.
    pub fn is_expired(&self, asset: &Asset) -> bool {
        asset.end_date.at() < self.0
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

/// What a run does with each host's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Show assets that ended more than `days` ago.
    List { days: u32 },
    /// Delete assets that ended more than `days` ago.
    Remove { days: u32 },
    /// No cutoff: show the whole catalog.
    Report,
}

impl Mode {
    /// List wins when both are set.
    pub fn resolve(list_days: Option<u32>, remove_days: Option<u32>) -> Self {
        match (list_days, remove_days) {
            (Some(days), _) => Mode::List { days },
            (None, Some(days)) => Mode::Remove { days },
            (None, None) => Mode::Report,
        }
    }
}
