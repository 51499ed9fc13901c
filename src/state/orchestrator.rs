use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::foundation::core::ExtractionRate;
use crate::foundation::error::{TagtrackError, TagtrackResult};
use crate::interpolate::engine::{interpolate_regions, interpolation_pairs, merge_interpolated};
use crate::model::asset::{Asset, AssetMetadata, AssetState};
use crate::model::region::{Region, RegionType};
use crate::placement::engine::{PlacementCanvas, duplicate_regions_and_move};
use crate::state::history::EditHistory;
use crate::state::rules::{next_asset_state_for, shape_counts};
use crate::store::AssetMetadataStore;
use crate::surface::RegionSurface;
use crate::tracker::region_metadata::{Navigation, RegionMetadataTracker};
use crate::tracking::engine::track_regions;

/// Result of pushing an edited region list through the state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionsChanged {
    /// Persisted metadata, or the rejected input when `is_valid` is false.
    pub asset_metadata: AssetMetadata,
    /// False when a region has no tags; nothing was persisted.
    pub is_valid: bool,
    /// False when a step label is required but missing.
    pub is_step_valid: bool,
}

/// Summary of a batch interpolation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InterpolationReport {
    /// Region ids that produced at least one frame.
    pub regions: Vec<String>,
    /// Names of every frame written, in write order.
    pub frames: Vec<String>,
}

/// Top-level state machine for assets and regions.
///
/// Owns the asset index (name to asset, roots included), the region metadata tracker and the
/// per-asset undo history. Region lists are persisted through the store `S`.
pub struct Orchestrator<S> {
    config: EngineConfig,
    rate: ExtractionRate,
    assets: BTreeMap<String, Asset>,
    store: S,
    tracker: RegionMetadataTracker,
    history: BTreeMap<String, EditHistory<Vec<Region>>>,
}

impl<S: AssetMetadataStore> Orchestrator<S> {
    /// Build an orchestrator over `store`, indexing everything it already holds.
    pub fn new(config: EngineConfig, store: S) -> TagtrackResult<Self> {
        config.validate()?;
        let rate = config.extraction_rate()?;

        let docs: Vec<AssetMetadata> = store
            .names()
            .iter()
            .filter_map(|name| store.get(name).cloned())
            .collect();
        let assets = docs
            .iter()
            .map(|md| (md.asset.name.clone(), md.asset.clone()))
            .collect();
        let tracker = RegionMetadataTracker::from_assets(&docs);

        Ok(Self {
            config,
            rate,
            assets,
            store,
            tracker,
            history: BTreeMap::new(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Region metadata index.
    pub fn tracker(&self) -> &RegionMetadataTracker {
        &self.tracker
    }

    /// Persistence collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Asset by name.
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    /// Every known asset, ordered by name.
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    /// Add or replace an asset in the index.
    pub fn register_asset(&mut self, asset: Asset) {
        self.assets.insert(asset.name.clone(), asset);
    }

    /// Current metadata of a known asset.
    pub fn load(&self, name: &str) -> TagtrackResult<AssetMetadata> {
        let asset = self
            .assets
            .get(name)
            .ok_or_else(|| TagtrackError::not_found(format!("asset '{name}'")))?;
        let mut md = self.store.load(asset)?;
        md.asset = asset.clone();
        Ok(md)
    }

    /// Split into the asset index and the store.
    pub fn into_parts(self) -> (Vec<Asset>, S) {
        (self.assets.into_values().collect(), self.store)
    }

    /// Validate an edited region list, derive states, persist, and reindex.
    #[tracing::instrument(skip(self, metadata), fields(asset = %metadata.asset.name))]
    pub fn apply_regions_changed(
        &mut self,
        metadata: AssetMetadata,
    ) -> TagtrackResult<RegionsChanged> {
        self.apply(metadata, true)
    }

    fn step_valid(&self, md: &AssetMetadata) -> bool {
        !(self.config.require_step && !md.regions.is_empty() && md.asset.step.is_none())
    }

    fn apply(
        &mut self,
        mut metadata: AssetMetadata,
        record_history: bool,
    ) -> TagtrackResult<RegionsChanged> {
        let is_step_valid = self.step_valid(&metadata);
        if let Some(untagged) = metadata.regions.iter().find(|r| !r.is_tagged()) {
            tracing::warn!(region = %untagged.id, "edit rejected: region has no tags");
            return Ok(RegionsChanged {
                asset_metadata: metadata,
                is_valid: false,
                is_step_valid,
            });
        }

        let name = metadata.asset.name.clone();
        let previous = match self.assets.get(&name) {
            Some(asset) => {
                let mut md = self.store.load(asset)?;
                md.asset.state = asset.state;
                md
            }
            None => AssetMetadata::new(metadata.asset.clone()),
        };

        let state = next_asset_state_for(previous.asset.state, &metadata.regions);
        if state != previous.asset.state {
            tracing::debug!(from = ?previous.asset.state, to = ?state, "asset state changed");
        }
        metadata.asset.state = state;
        let (polygons, polylines) = shape_counts(&metadata.regions);
        metadata.asset.polygon_number = polygons;
        metadata.asset.polyline_number = polylines;
        metadata.version = previous.version + 1;

        let changed = previous.regions != metadata.regions;
        let saved = self.store.save(metadata)?;
        if record_history && changed {
            let depth = self.config.undo_depth;
            self.history
                .entry(name.clone())
                .or_insert_with(|| EditHistory::new(depth))
                .record(previous.regions);
        }

        self.assets.insert(name, saved.asset.clone());
        self.tracker.reindex([&saved]);
        self.propagate_to_root(&saved.asset, saved.asset.timestamp);

        Ok(RegionsChanged {
            asset_metadata: saved,
            is_valid: true,
            is_step_valid,
        })
    }

    /// Recompute a root asset's state from its child frames.
    fn propagate_to_root(&mut self, frame: &Asset, visited: Option<f64>) {
        let Some(parent) = frame.parent.as_deref() else {
            return;
        };
        let tagged = self.assets.values().any(|a| {
            a.parent.as_deref() == Some(parent) && (a.state.is_tagged() || a.has_annotations())
        });
        let Some(root) = self.assets.get_mut(parent) else {
            tracing::debug!(parent, "root asset not registered, skipping propagation");
            return;
        };
        root.state = if tagged {
            AssetState::Sample
        } else {
            AssetState::NotVisited
        };
        if let Some(t) = visited {
            root.last_visited_timestamp = Some(t);
        }
    }

    /// Delete one region from one asset.
    pub fn remove_region(
        &mut self,
        asset_name: &str,
        region_id: &str,
    ) -> TagtrackResult<RegionsChanged> {
        let mut md = self.load(asset_name)?;
        md.remove_region(region_id).ok_or_else(|| {
            TagtrackError::not_found(format!("region '{region_id}' on '{asset_name}'"))
        })?;
        self.apply_regions_changed(md)
    }

    /// Restore the region list that preceded the last edit of `asset_name`.
    pub fn undo(&mut self, asset_name: &str) -> TagtrackResult<Option<RegionsChanged>> {
        self.step_history(asset_name, true)
    }

    /// Re-apply an edit that was undone.
    pub fn redo(&mut self, asset_name: &str) -> TagtrackResult<Option<RegionsChanged>> {
        self.step_history(asset_name, false)
    }

    fn step_history(
        &mut self,
        asset_name: &str,
        back: bool,
    ) -> TagtrackResult<Option<RegionsChanged>> {
        let mut md = self.load(asset_name)?;
        let Some(history) = self.history.get_mut(asset_name) else {
            return Ok(None);
        };
        let before = history.clone();
        let current = std::mem::take(&mut md.regions);
        let restored = if back {
            history.undo(current)
        } else {
            history.redo(current)
        };
        let Some(regions) = restored else {
            return Ok(None);
        };
        md.regions = regions;

        let result = self.apply(md, false);
        if !matches!(&result, Ok(out) if out.is_valid) {
            // History must keep matching what the store holds.
            tracing::debug!(asset = asset_name, "history step rolled back");
            self.history.insert(asset_name.to_string(), before);
        }
        result.map(Some)
    }

    /// Carry regions from the previous displayed frame into the current one.
    ///
    /// Returns `None` when tracking is disabled.
    #[tracing::instrument(skip(self, surface))]
    pub fn advance_frame(
        &mut self,
        previous_name: &str,
        current_name: &str,
        surface: &mut dyn RegionSurface,
    ) -> TagtrackResult<Option<RegionsChanged>> {
        if !self.config.tracking_enabled {
            return Ok(None);
        }
        let previous = self.load(previous_name)?;
        let mut current = self.load(current_name)?;
        let outcome = track_regions(&previous, &current, &self.tracker);

        for region in &outcome.delete_regions {
            surface.delete_region(&region.id);
        }
        for region in &outcome.add_regions {
            let replaced = outcome.delete_regions.iter().any(|d| d.id == region.id);
            if current.region(&region.id).is_some() && !replaced {
                surface.update_region(region);
            } else {
                surface.add_region(region);
            }
        }

        outcome.apply_to(&mut current);
        self.apply_regions_changed(current).map(Some)
    }

    /// Paste `regions` onto `target_name`, moving any that would land on themselves.
    #[tracing::instrument(skip(self, regions, surface), fields(count = regions.len()))]
    pub fn paste_regions(
        &mut self,
        target_name: &str,
        regions: &[Region],
        surface: &mut dyn RegionSurface,
    ) -> TagtrackResult<RegionsChanged> {
        let mut target = self.load(target_name)?;
        let canvas = PlacementCanvas {
            width: f64::from(target.asset.size.width),
            height: f64::from(target.asset.size.height),
            margin: self.config.paste_margin,
        };
        let placed = duplicate_regions_and_move(regions, &target.regions, canvas)?;
        for region in placed {
            surface.add_region(&region);
            target.upsert_region(region);
        }
        self.apply_regions_changed(target)
    }

    /// Lock or unlock a region everywhere.
    pub fn set_region_locked(
        &mut self,
        region_id: &str,
        locked: bool,
        surface: &mut dyn RegionSurface,
    ) {
        self.tracker.set_locked(region_id, locked);
        surface.set_locked(region_id, locked);
    }

    /// Hide or show a region everywhere.
    pub fn set_region_hidden(
        &mut self,
        region_id: &str,
        hidden: bool,
        surface: &mut dyn RegionSurface,
    ) {
        self.tracker.set_hidden(region_id, hidden);
        surface.set_hidden(region_id, hidden);
    }

    /// Keyframe asset names of a region.
    pub fn keyframe_asset_names(&self, region_id: &str) -> Vec<String> {
        self.tracker.keyframe_asset_names(region_id)
    }

    /// Keyframe reached from `current` in direction `nav`.
    pub fn navigate(&self, region_id: &str, current: f64, nav: Navigation) -> Option<String> {
        self.tracker.navigate(region_id, current, nav)
    }

    /// Fill every short gap between consecutive keyframes of `region_id`.
    #[tracing::instrument(skip(self))]
    pub fn interpolate_region(&mut self, region_id: &str) -> TagtrackResult<Vec<String>> {
        let keyframes = self
            .tracker
            .keyframe_asset_names(region_id)
            .iter()
            .map(|name| self.load(name))
            .collect::<TagtrackResult<Vec<_>>>()?;

        let interpolable = keyframes.iter().all(|k| {
            k.region(region_id).is_some_and(|r| {
                matches!(r.region_type, RegionType::Rectangle | RegionType::Square)
            })
        });
        if !interpolable {
            return Ok(Vec::new());
        }

        let mut frames = BTreeMap::new();
        for (a, b) in interpolation_pairs(&keyframes, self.rate, self.config.max_interpolation_gap)
        {
            frames.extend(interpolate_regions(
                a,
                b,
                region_id,
                self.rate,
                self.config.interpolation_method,
            ));
        }
        self.merge_frames(frames)
    }

    /// Interpolate every indexed region.
    ///
    /// Frames written before a failing step stay written.
    #[tracing::instrument(skip(self))]
    pub fn interpolate_all(&mut self) -> TagtrackResult<InterpolationReport> {
        let ids: Vec<String> = self.tracker.iter().map(|(id, _)| id.to_string()).collect();
        let mut report = InterpolationReport::default();
        for id in ids {
            let frames = self.interpolate_region(&id)?;
            if !frames.is_empty() {
                report.regions.push(id);
                report.frames.extend(frames);
            }
        }
        tracing::debug!(
            regions = report.regions.len(),
            frames = report.frames.len(),
            "interpolation batch finished"
        );
        Ok(report)
    }

    fn merge_frames(
        &mut self,
        frames: BTreeMap<String, AssetMetadata>,
    ) -> TagtrackResult<Vec<String>> {
        if frames.is_empty() {
            return Ok(Vec::new());
        }
        let mut local = BTreeMap::new();
        for name in frames.keys() {
            if self.assets.contains_key(name) {
                local.insert(name.clone(), self.load(name)?);
            }
        }

        let touched = merge_interpolated(&mut local, frames);
        for name in &touched {
            let Some(mut md) = local.remove(name) else {
                continue;
            };
            if md.asset.state == AssetState::NotVisited {
                md.asset.state = AssetState::Interpolated;
            }
            md.version += 1;
            let saved = self.store.save(md)?;
            let name = saved.asset.name.clone();
            self.assets.insert(name, saved.asset.clone());
            self.tracker.reindex([&saved]);
            self.propagate_to_root(&saved.asset, None);
        }
        Ok(touched)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/orchestrator.rs"]
mod tests;
