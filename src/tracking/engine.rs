use crate::foundation::math::approx_eq;
use crate::model::asset::AssetMetadata;
use crate::model::region::{Region, RegionState, RegionType};
use crate::tracker::region_metadata::RegionMetadataTracker;

/// Region deltas to apply to the current frame after a frame transition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingOutcome {
    /// Regions to upsert by id.
    pub add_regions: Vec<Region>,
    /// Regions to remove by id before the upserts are applied.
    pub delete_regions: Vec<Region>,
    /// Step label to carry onto the current frame, when it has none.
    pub step: Option<String>,
}

impl TrackingOutcome {
    /// `true` when applying the outcome would not change the frame.
    pub fn is_empty(&self) -> bool {
        self.add_regions.is_empty() && self.delete_regions.is_empty() && self.step.is_none()
    }

    /// Apply deletions, then upserts, then the carried step label.
    pub fn apply_to(&self, current: &mut AssetMetadata) {
        for region in &self.delete_regions {
            current.remove_region(&region.id);
        }
        for region in &self.add_regions {
            current.upsert_region(region.clone());
        }
        if current.asset.step.is_none()
            && let Some(step) = &self.step
        {
            current.asset.step = Some(step.clone());
        }
    }
}

/// Whether `region` may be carried from `previous` into a frame at `current_t`.
fn is_candidate(
    region: &Region,
    previous_t: Option<f64>,
    current_t: Option<f64>,
    tracker: &RegionMetadataTracker,
) -> bool {
    if region.region_type != RegionType::Rectangle {
        return false;
    }
    let Some(rm) = tracker.get(&region.id) else {
        return true;
    };
    if rm.is_locked || rm.is_hidden {
        return false;
    }
    // A region is not carried to frames earlier than the one it starts on.
    match (previous_t, current_t, rm.first_timestamp) {
        (Some(prev), Some(cur), Some(first)) => !(cur < prev && approx_eq(prev, first)),
        _ => true,
    }
}

/// Propagate regions from the previous displayed frame into the current one.
///
/// User work on the current frame wins: a region freshly drawn there is left alone, and a
/// region whose geometry diverged is swapped for an `Editted` copy of itself. Everything else
/// is carried over as `Tracked`.
#[tracing::instrument(skip_all, fields(previous = %previous.asset.name, current = %current.asset.name))]
pub fn track_regions(
    previous: &AssetMetadata,
    current: &AssetMetadata,
    tracker: &RegionMetadataTracker,
) -> TrackingOutcome {
    let previous_t = previous.asset.timestamp;
    let current_t = current.asset.timestamp;
    let mut outcome = TrackingOutcome::default();

    for region in &previous.regions {
        if !is_candidate(region, previous_t, current_t, tracker) {
            continue;
        }
        match current.region(&region.id) {
            Some(existing) if !existing.points_eq(region) => {
                outcome.delete_regions.push(existing.clone());
                outcome
                    .add_regions
                    .push(existing.clone().with_state(RegionState::Editted));
            }
            Some(existing) if existing.state == RegionState::Inputted => {}
            _ => outcome
                .add_regions
                .push(region.clone().with_state(RegionState::Tracked)),
        }
    }

    if current.asset.step.is_none() {
        outcome.step = previous.asset.step.clone();
    }

    tracing::debug!(
        added = outcome.add_regions.len(),
        deleted = outcome.delete_regions.len(),
        "tracked frame transition"
    );
    outcome
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/engine.rs"]
mod tests;
