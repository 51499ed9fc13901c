use std::collections::BTreeMap;

use crate::foundation::core::{BoundingBox, ExtractionRate};
use crate::foundation::math::Lerp;
use crate::model::asset::{Asset, AssetMetadata, AssetState, AssetType, video_frame_name};
use crate::model::region::RegionState;

/// Algorithm used to synthesize in-between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpolationMethod {
    /// Time-proportional blend of the two boundary boxes.
    #[default]
    Linear,
    /// Reserved; produces nothing.
    MeanShift,
    /// Reserved; produces nothing.
    #[serde(rename = "OSVOS")]
    Osvos,
}

/// Synthesize `region_id` on every grid frame strictly between two boundary assets.
///
/// Returns an empty map, without error, when either boundary lacks a timestamp, the boundaries
/// do not share a parent, the region is missing from either boundary, or `method` has no
/// implementation.
#[tracing::instrument(skip(a, b), fields(a = %a.asset.name, b = %b.asset.name))]
pub fn interpolate_regions(
    a: &AssetMetadata,
    b: &AssetMetadata,
    region_id: &str,
    rate: ExtractionRate,
    method: InterpolationMethod,
) -> BTreeMap<String, AssetMetadata> {
    let mut out = BTreeMap::new();

    let (Some(ta), Some(tb)) = (a.asset.timestamp, b.asset.timestamp) else {
        return out;
    };
    let Some(parent) = a.asset.parent.as_deref() else {
        return out;
    };
    if b.asset.parent.as_deref() != Some(parent) {
        return out;
    }
    let (Some(ra), Some(rb)) = (a.region(region_id), b.region(region_id)) else {
        return out;
    };

    // Boundaries may arrive in either order.
    let ((t1, r1), (t2, r2)) = if ta <= tb {
        ((ta, ra), (tb, rb))
    } else {
        ((tb, rb), (ta, ra))
    };
    let dt = t2 - t1;
    if dt <= 0.0 {
        return out;
    }

    if method != InterpolationMethod::Linear {
        tracing::warn!(?method, "interpolation method not implemented, skipping");
        return out;
    }

    let template = ra.clone().with_state(RegionState::Interpolated);
    for k in rate.frames_between(t1, t2) {
        let t = rate.timestamp_of(k);
        let bbox = BoundingBox::lerp(&r1.bounding_box, &r2.bounding_box, (t - t1) / dt);

        let mut region = template.clone();
        region.set_box(bbox);

        let asset = Asset {
            name: video_frame_name(parent, t),
            asset_type: AssetType::VideoFrame,
            state: AssetState::Interpolated,
            size: a.asset.size,
            timestamp: Some(t),
            parent: Some(parent.to_string()),
            ..Asset::default()
        };
        out.insert(
            asset.name.clone(),
            AssetMetadata {
                asset,
                regions: vec![region],
                version: 0,
            },
        );
    }

    tracing::debug!(frames = out.len(), "interpolated region");
    out
}

/// Merge synthesized frames into `store`.
///
/// A frame that already exists only gets the matching region's box and points overwritten (the
/// region is appended when that frame did not carry it yet). New frames are inserted whole.
/// Returns the names of every touched frame.
pub fn merge_interpolated(
    store: &mut BTreeMap<String, AssetMetadata>,
    frames: BTreeMap<String, AssetMetadata>,
) -> Vec<String> {
    let mut touched = Vec::with_capacity(frames.len());
    for (name, frame) in frames {
        match store.get_mut(&name) {
            Some(existing) => {
                for region in frame.regions {
                    match existing.region_mut(&region.id) {
                        Some(current) => {
                            current.bounding_box = region.bounding_box;
                            current.points = region.points;
                        }
                        None => existing.regions.push(region),
                    }
                }
            }
            None => {
                store.insert(name.clone(), frame);
            }
        }
        touched.push(name);
    }
    touched
}

/// Consecutive keyframe pairs close enough in time to be interpolated.
///
/// `keyframes` must be ordered by timestamp. A pair qualifies when its gap is at most
/// `max_gap` extraction intervals and at least one grid frame lies strictly between them.
pub fn interpolation_pairs(
    keyframes: &[AssetMetadata],
    rate: ExtractionRate,
    max_gap: u32,
) -> Vec<(&AssetMetadata, &AssetMetadata)> {
    keyframes
        .windows(2)
        .filter_map(|w| {
            let (t1, t2) = (w[0].asset.timestamp?, w[1].asset.timestamp?);
            let gap = rate.frame_of(t2) - rate.frame_of(t1);
            (gap > 1 && gap <= i64::from(max_gap)).then_some((&w[0], &w[1]))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/interpolate/engine.rs"]
mod tests;
