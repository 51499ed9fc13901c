use crate::foundation::error::{TagtrackError, TagtrackResult};
use crate::foundation::math::approx_eq;

pub use kurbo::{Point, Rect, Vec2};

/// Axis-aligned box in asset pixel space, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Distance from the left edge of the asset.
    pub left: f64,
    /// Distance from the top edge of the asset.
    pub top: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl BoundingBox {
    /// Create a box from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The same box as a `kurbo` rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Build a box from a `kurbo` rectangle, normalizing flipped edges.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    /// Box moved by `delta`, size unchanged.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::from_rect(self.to_rect() + delta)
    }

    /// Box moved so its top-left corner sits at `origin`.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Corner points in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.to_rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    /// Return `true` when the box lies fully inside `[0, width) x [0, height)`.
    ///
    /// A box may touch the far edges: a box exactly as wide as the canvas fits at `left == 0`.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.left + self.width <= width
            && self.top + self.height <= height
    }

    /// Tolerant equality used when comparing geometry produced by floating point math.
    pub fn approx_eq(&self, other: &Self) -> bool {
        approx_eq(self.left, other.left)
            && approx_eq(self.top, other.top)
            && approx_eq(self.width, other.width)
            && approx_eq(self.height, other.height)
    }
}

/// Pixel size of an asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Frame extraction rate of a video, in frames per second.
///
/// Virtual video-frame assets live on the grid `k / rate` seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtractionRate(u32);

impl ExtractionRate {
    /// Create a validated rate (`>= 1`).
    pub fn new(fps: u32) -> TagtrackResult<Self> {
        if fps == 0 {
            return Err(TagtrackError::validation(
                "frame extraction rate must be >= 1",
            ));
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn fps(self) -> u32 {
        self.0
    }

    /// Seconds between two extracted frames.
    pub fn frame_skip_time(self) -> f64 {
        1.0 / f64::from(self.0)
    }

    /// Timestamp of grid frame `k`.
    ///
    /// Computed as `k / rate` rather than `k * (1 / rate)` so that [`Self::snap`] maps it back
    /// onto itself exactly.
    pub fn timestamp_of(self, k: i64) -> f64 {
        k as f64 / f64::from(self.0)
    }

    /// Nearest grid frame index for `t`.
    pub fn frame_of(self, t: f64) -> i64 {
        (t * f64::from(self.0)).round() as i64
    }

    /// Snap `t` onto the nearest grid timestamp.
    pub fn snap(self, t: f64) -> f64 {
        self.timestamp_of(self.frame_of(t))
    }

    /// Grid frame indices strictly between `t1` and `t2` (`t1 < t2`).
    pub fn frames_between(self, t1: f64, t2: f64) -> std::ops::RangeInclusive<i64> {
        let fps = f64::from(self.0);
        let eps = 1e-6;
        let first = (t1 * fps + eps).floor() as i64 + 1;
        let last = (t2 * fps - eps).ceil() as i64 - 1;
        first..=last
    }
}

impl Default for ExtractionRate {
    fn default() -> Self {
        Self(15)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
