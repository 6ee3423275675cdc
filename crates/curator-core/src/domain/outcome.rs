//! Outcome model: what one host's cycle produced.
//!
//! These values only drive output; nothing is persisted. The reporter turns a
//! `HostReport` into text, library callers can inspect a `RunSummary` directly.

use super::asset::{Asset, AssetId, EndDate};
use super::cutoff::Cutoff;
use super::host::HostAddress;

/// A `(end_date, name)` row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedAsset {
    pub end_date: EndDate,
    pub name: String,
}

impl From<&Asset> for ListedAsset {
    fn from(asset: &Asset) -> Self {
        Self {
            end_date: asset.end_date.clone(),
            name: asset.name.clone(),
        }
    }
}

/// One delete that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionFailure {
    pub asset_id: AssetId,
    /// HTTP status (`404 Not Found`) or transport message.
    pub reason: String,
}

/// Result of one host's cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOutcome {
    /// List mode: expired assets, in fetch order.
    Listed {
        cutoff: Cutoff,
        matches: Vec<ListedAsset>,
    },

    /// Remove mode: `processed` counts every worklist item, failed or not.
    Deleted {
        processed: usize,
        failures: Vec<DeletionFailure>,
    },

    /// No cutoff: the whole catalog, in fetch order.
    Reported { assets: Vec<Asset> },
}

impl HostOutcome {
    pub fn count(&self) -> usize {
        match self {
            HostOutcome::Listed { matches, .. } => matches.len(),
            HostOutcome::Deleted { processed, .. } => *processed,
            HostOutcome::Reported { assets } => assets.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostReport {
    pub host: HostAddress,
    pub outcome: HostOutcome,
}

/// A host whose cycle was abandoned without stopping the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedHost {
    pub host: HostAddress,
    pub reason: String,
}

/// Everything a completed run produced, in host order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub reports: Vec<HostReport>,
    pub skipped: Vec<SkippedHost>,
}

impl RunSummary {
    pub fn hosts_processed(&self) -> usize {
        self.reports.len()
    }

    pub fn deletion_failures(&self) -> usize {
        self.reports
            .iter()
            .map(|report| match &report.outcome {
                HostOutcome::Deleted { failures, .. } => failures.len(),
                _ => 0,
            })
            .sum()
    }
}
