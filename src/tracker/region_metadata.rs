use std::collections::{BTreeMap, BTreeSet};

use crate::model::asset::{AssetMetadata, AssetType};
use crate::model::region::RegionState;

/// One occurrence of a region id on a specific asset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAssetEntry {
    /// State of the region on that asset.
    pub region_state: RegionState,
    /// Kind of the asset.
    pub asset_type: AssetType,
    /// Frame timestamp, for video frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

/// Project-wide record of one region id.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionMetadata {
    /// Occurrences keyed by asset name.
    pub assets: BTreeMap<String, RegionAssetEntry>,
    /// Locked regions are not moved by tracking.
    #[serde(default)]
    pub is_locked: bool,
    /// Hidden regions are not rendered nor tracked.
    #[serde(default)]
    pub is_hidden: bool,
    /// Smallest recorded video-frame timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_timestamp: Option<f64>,
    /// Largest recorded video-frame timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_timestamp: Option<f64>,
}

impl RegionMetadata {
    fn widen(&mut self, t: f64) {
        self.first_timestamp = Some(self.first_timestamp.map_or(t, |f| f.min(t)));
        self.last_timestamp = Some(self.last_timestamp.map_or(t, |l| l.max(t)));
    }

    fn rescan_bounds(&mut self) {
        let mut ts = self.assets.values().filter_map(|e| e.timestamp);
        let Some(first) = ts.next() else {
            self.first_timestamp = None;
            self.last_timestamp = None;
            return;
        };
        let (lo, hi) = ts.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        self.first_timestamp = Some(lo);
        self.last_timestamp = Some(hi);
    }

    /// Occurrences ordered by timestamp (untimed assets first, then by name).
    pub fn ordered(&self) -> Vec<(&str, &RegionAssetEntry)> {
        let mut out: Vec<(&str, &RegionAssetEntry)> = self
            .assets
            .iter()
            .map(|(name, e)| (name.as_str(), e))
            .collect();
        out.sort_by(|(an, a), (bn, b)| {
            let ta = a.timestamp.unwrap_or(f64::NEG_INFINITY);
            let tb = b.timestamp.unwrap_or(f64::NEG_INFINITY);
            ta.total_cmp(&tb).then_with(|| an.cmp(bn))
        });
        out
    }
}

/// Direction of a temporal navigation query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Earliest keyframe.
    First,
    /// Latest keyframe strictly before the current timestamp.
    Previous,
    /// Earliest keyframe strictly after the current timestamp.
    Next,
    /// Latest keyframe.
    Last,
}

/// Index of every region id across all per-asset occurrences.
///
/// Region identity is a plain string key; assets refer to regions by id and the tracker refers
/// to assets by name.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RegionMetadataTracker {
    regions: BTreeMap<String, RegionMetadata>,
}

impl RegionMetadataTracker {
    /// Empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from scratch over `list`.
    pub fn from_assets<'a>(list: impl IntoIterator<Item = &'a AssetMetadata>) -> Self {
        let mut tracker = Self::new();
        tracker.reindex(list);
        tracker
    }

    /// Upsert every (asset, region) pair of `list`.
    ///
    /// Occurrences previously recorded for a listed asset whose region is gone are dropped, so
    /// reindexing an edited asset never leaves orphans behind.
    #[tracing::instrument(skip_all)]
    pub fn reindex<'a>(
        &mut self,
        list: impl IntoIterator<Item = &'a AssetMetadata>,
    ) -> &BTreeMap<String, RegionMetadata> {
        let mut upserts = 0usize;
        for md in list {
            let asset = &md.asset;
            let present: BTreeSet<&str> = md.regions.iter().map(|r| r.id.as_str()).collect();
            let stale: Vec<String> = self
                .regions
                .iter()
                .filter(|(id, rm)| {
                    rm.assets.contains_key(&asset.name) && !present.contains(id.as_str())
                })
                .map(|(id, _)| id.clone())
                .collect();
            for id in stale {
                self.remove_region_from_asset(&id, &asset.name);
            }

            let timestamp = if asset.is_video_frame() {
                asset.timestamp
            } else {
                None
            };
            for region in &md.regions {
                let rm = self.regions.entry(region.id.clone()).or_default();
                rm.assets.insert(
                    asset.name.clone(),
                    RegionAssetEntry {
                        region_state: region.state,
                        asset_type: asset.asset_type,
                        timestamp,
                    },
                );
                if let Some(t) = timestamp {
                    rm.widen(t);
                }
                upserts += 1;
            }
        }
        tracing::debug!(upserts, regions = self.regions.len(), "reindexed regions");
        &self.regions
    }

    /// Drop the occurrence of `region_id` on `asset_name`.
    ///
    /// When the dropped timestamp was the recorded first or last one, the bounds are rebuilt
    /// from every remaining occurrence. The aggregate entry survives with its lock/hide flags.
    pub fn remove_region_from_asset(&mut self, region_id: &str, asset_name: &str) -> bool {
        let Some(rm) = self.regions.get_mut(region_id) else {
            return false;
        };
        let Some(removed) = rm.assets.remove(asset_name) else {
            return false;
        };
        if let Some(t) = removed.timestamp
            && (rm.first_timestamp == Some(t) || rm.last_timestamp == Some(t))
        {
            rm.rescan_bounds();
        }
        true
    }

    /// Metadata of one region id.
    pub fn get(&self, region_id: &str) -> Option<&RegionMetadata> {
        self.regions.get(region_id)
    }

    /// Every indexed region id with its metadata.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionMetadata)> {
        self.regions.iter().map(|(id, rm)| (id.as_str(), rm))
    }

    /// Number of indexed region ids.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// `true` when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether `region_id` is locked.
    pub fn is_locked(&self, region_id: &str) -> bool {
        self.regions.get(region_id).is_some_and(|rm| rm.is_locked)
    }

    /// Whether `region_id` is hidden.
    pub fn is_hidden(&self, region_id: &str) -> bool {
        self.regions.get(region_id).is_some_and(|rm| rm.is_hidden)
    }

    /// Lock or unlock a region, creating its entry when unknown.
    pub fn set_locked(&mut self, region_id: &str, locked: bool) {
        let rm = self.regions.entry(region_id.to_string()).or_default();
        rm.is_locked = locked;
    }

    /// Hide or show a region, creating its entry when unknown.
    pub fn set_hidden(&mut self, region_id: &str, hidden: bool) {
        let rm = self.regions.entry(region_id.to_string()).or_default();
        rm.is_hidden = hidden;
    }

    fn keyframes(&self, region_id: &str) -> Vec<(&str, &RegionAssetEntry)> {
        let Some(rm) = self.regions.get(region_id) else {
            return Vec::new();
        };
        let ordered = rm.ordered();
        let last = ordered.len().saturating_sub(1);
        ordered
            .into_iter()
            .enumerate()
            .filter(|(i, (_, e))| *i == 0 || *i == last || e.region_state.is_keyframe())
            .map(|(_, pair)| pair)
            .collect()
    }

    /// Minimal representative occurrences of a region, ordered by timestamp.
    ///
    /// Keeps `Editted`, `Inputted` and `Tracked` occurrences plus both endpoints, whatever
    /// their state.
    pub fn keyframe_asset_names(&self, region_id: &str) -> Vec<String> {
        self.keyframes(region_id)
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Keyframe reached from `current` in direction `nav`.
    ///
    /// `First` and `Last` ignore `current`. `Previous`/`Next` compare strictly, so a keyframe
    /// sitting exactly at `current` is never returned.
    pub fn navigate(&self, region_id: &str, current: f64, nav: Navigation) -> Option<String> {
        let keyframes = self.keyframes(region_id);
        let timed = keyframes
            .iter()
            .filter_map(|(name, e)| e.timestamp.map(|t| (*name, t)));
        let found = match nav {
            Navigation::First => keyframes.first().map(|(name, _)| *name),
            Navigation::Last => keyframes.last().map(|(name, _)| *name),
            Navigation::Previous => timed
                .filter(|(_, t)| *t < current)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(name, _)| name),
            Navigation::Next => timed
                .filter(|(_, t)| *t > current)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(name, _)| name),
        };
        found.map(str::to_string)
    }

    /// Earliest keyframe of `region_id`.
    pub fn first_asset_name(&self, region_id: &str, current: f64) -> Option<String> {
        self.navigate(region_id, current, Navigation::First)
    }

    /// Latest keyframe of `region_id` before `current`.
    pub fn previous_asset_name(&self, region_id: &str, current: f64) -> Option<String> {
        self.navigate(region_id, current, Navigation::Previous)
    }

    /// Earliest keyframe of `region_id` after `current`.
    pub fn next_asset_name(&self, region_id: &str, current: f64) -> Option<String> {
        self.navigate(region_id, current, Navigation::Next)
    }

    /// Latest keyframe of `region_id`.
    pub fn last_asset_name(&self, region_id: &str, current: f64) -> Option<String> {
        self.navigate(region_id, current, Navigation::Last)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracker/region_metadata.rs"]
mod tests;
