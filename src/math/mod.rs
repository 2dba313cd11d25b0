//! Mathematical primitives and helpers.

mod iso;

use glam::DVec2;
pub use iso::Iso;

/// Linearly interpolate between two points.
///
/// Internally this calls:
///
/// ```
/// # use glam::DVec2;
/// # fn func(lhs: DVec2, rhs: DVec2, factor: f64) -> DVec2 {
/// lhs + (rhs - lhs) * factor
/// # }
/// ```
///
/// The factor is not clamped, values above `1.0` overshoot past `rhs`.
///
/// # Arguments
///
/// * `lhs` - First point, will be returned if `factor == 0.0`.
/// * `rhs` - Second point, will be returned if `factor == 1.0`.
/// * `factor` - Interpolation value.
///
/// # Returns
///
/// - The interpolated point.
#[inline]
#[must_use]
pub fn lerp(lhs: DVec2, rhs: DVec2, factor: f64) -> DVec2 {
    lhs + (rhs - lhs) * factor
}

/// Unit vector pointing from one point to another.
///
/// # Returns
///
/// - `None` when both points coincide, a zero vector can't be normalized.
/// - `Some(..)` with the normalized direction otherwise.
#[inline]
#[must_use]
pub fn direction(from: DVec2, to: DVec2) -> Option<DVec2> {
    (to - from).try_normalize()
}

/// Angle in radians of a direction vector, measured from the positive X axis.
#[inline]
#[must_use]
pub fn heading_angle(direction: DVec2) -> f64 {
    direction.y.atan2(direction.x)
}
