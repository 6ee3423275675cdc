//! Cutoff filter.
//!
//! Every function here preserves fetch order and never sorts.

use crate::domain::{Asset, AssetId, Cutoff, ListedAsset};

/// List mode: `(end_date, name)` of every expired asset.
pub fn listing(assets: &[Asset], cutoff: &Cutoff) -> Vec<ListedAsset> {
    assets
        .iter()
        .filter(|asset| cutoff.is_expired(asset))
        .map(ListedAsset::from)
        .collect()
}

/// Remove mode: ids of every expired asset.
pub fn worklist(assets: &[Asset], cutoff: &Cutoff) -> Vec<AssetId> {
    assets
        .iter()
        .filter(|asset| cutoff.is_expired(asset))
        .map(|asset| asset.asset_id.clone())
        .collect()
}
