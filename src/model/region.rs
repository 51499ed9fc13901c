use crate::foundation::core::{BoundingBox, Point, Vec2};
use crate::foundation::math::approx_eq;

/// Geometric shape of a region.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RegionType {
    /// Axis-aligned rectangle; the only shape propagated by tracking.
    #[default]
    Rectangle,
    /// Closed polygon.
    Polygon,
    /// Open polyline.
    Polyline,
    /// Single point.
    Point,
    /// Rectangle constrained to equal sides.
    Square,
}

/// How the geometry of a region occurrence came to be.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RegionState {
    /// Drawn by the user on this asset.
    #[default]
    Inputted,
    /// Carried over from the previous frame by tracking.
    Tracked,
    /// Edited by the user after being created elsewhere.
    Editted,
    /// Synthesized between two keyframes.
    Interpolated,
    /// Polygon drawn by the user.
    PolygonInputted,
    /// Polyline drawn by the user.
    PolylineInputted,
}

impl RegionState {
    /// States in iteration order.
    pub const ALL: [RegionState; 6] = [
        RegionState::Inputted,
        RegionState::Tracked,
        RegionState::Editted,
        RegionState::Interpolated,
        RegionState::PolygonInputted,
        RegionState::PolylineInputted,
    ];

    /// States whose occurrences count as keyframes for navigation and interpolation.
    pub fn is_keyframe(self) -> bool {
        matches!(
            self,
            RegionState::Editted | RegionState::Inputted | RegionState::Tracked
        )
    }

    /// States that let an asset be promoted to `Tracked`.
    pub fn is_tracked_or_editted(self) -> bool {
        matches!(self, RegionState::Tracked | RegionState::Editted)
    }
}

/// A user-drawn geometric annotation.
///
/// `id` identifies the physical object and stays the same on every asset that depicts it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Stable identity across frames.
    pub id: String,
    /// Shape kind.
    #[serde(rename = "type")]
    pub region_type: RegionType,
    /// Tag labels. Empty means the region is invalid.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Detector or annotator confidence in `[0, 1]`.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Enclosing box.
    pub bounding_box: BoundingBox,
    /// Shape vertices in asset pixel space.
    #[serde(default)]
    pub points: Vec<Point>,
    /// Provenance of this occurrence.
    #[serde(default)]
    pub state: RegionState,
}

fn default_confidence() -> f64 {
    1.0
}

impl Region {
    /// Fresh rectangle with a new random id, as produced by a completed draw.
    pub fn rectangle(tags: Vec<String>, bounding_box: BoundingBox) -> Self {
        Self {
            id: new_region_id(),
            region_type: RegionType::Rectangle,
            tags,
            confidence: default_confidence(),
            bounding_box,
            points: bounding_box.corners().to_vec(),
            state: RegionState::Inputted,
        }
    }

    /// Same region with a different id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Same region with `state` replaced.
    pub fn with_state(mut self, state: RegionState) -> Self {
        self.state = state;
        self
    }

    /// `true` when at least one tag is attached.
    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Move the box and every point by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.bounding_box = self.bounding_box.translated(delta);
        for p in &mut self.points {
            *p += delta;
        }
    }

    /// Replace the box and recompute the four rectangle corners from it.
    pub fn set_box(&mut self, bounding_box: BoundingBox) {
        self.bounding_box = bounding_box;
        self.points = bounding_box.corners().to_vec();
    }

    /// Tolerant comparison of the vertex lists.
    pub fn points_eq(&self, other: &Region) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| approx_eq(a.x, b.x) && approx_eq(a.y, b.y))
    }
}

/// New random region id.
pub fn new_region_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/model/region.rs"]
mod tests;
