/// Tolerance used for geometry and timestamp comparisons.
pub(crate) const EPSILON: f64 = 1e-6;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Componentwise interpolation used by the linear interpolation engine.
pub(crate) trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for crate::foundation::core::BoundingBox {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            left: f64::lerp(&a.left, &b.left, t),
            top: f64::lerp(&a.top, &b.top, t),
            width: f64::lerp(&a.width, &b.width, t),
            height: f64::lerp(&a.height, &b.height, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
