use crate::model::asset::AssetState;
use crate::model::region::{Region, RegionState};

/// Next tagging state of an asset after its regions changed.
///
/// `has_tagged_regions` is false only when the asset has no regions left: untagged regions are
/// rejected before state derivation runs.
pub fn next_asset_state(
    current: AssetState,
    has_tagged_regions: bool,
    all_tracked_or_editted: bool,
) -> AssetState {
    use AssetState::*;

    match (current, has_tagged_regions, all_tracked_or_editted) {
        (NotVisited | Tracked | Interpolated, true, true) => Tracked,
        (Store | Freeze | FreezeStore | NotVisited, true, _) => Sample,
        (Sample | Tracked | Interpolated, false, _) => NotVisited,
        (state, _, _) => state,
    }
}

/// Derive the next state directly from a region list.
pub fn next_asset_state_for(current: AssetState, regions: &[Region]) -> AssetState {
    let has_tagged = regions.iter().any(Region::is_tagged);
    let all_tracked =
        !regions.is_empty() && regions.iter().all(|r| r.state.is_tracked_or_editted());
    next_asset_state(current, has_tagged, all_tracked)
}

/// `(polygon_number, polyline_number)` for a region list.
pub fn shape_counts(regions: &[Region]) -> (usize, usize) {
    let mut counts = (0, 0);
    for r in regions {
        match r.state {
            RegionState::PolygonInputted => counts.0 += 1,
            RegionState::PolylineInputted => counts.1 += 1,
            _ => {}
        }
    }
    counts
}

#[cfg(test)]
#[path = "../../tests/unit/state/rules.rs"]
mod tests;
