//! Conversions between push directions and angles in degrees.
//!
//! Angles are measured counter-clockwise from +x and live in `[0, 360)`.

use glam::Vec2;

use crate::error::GeometryError;

/// Unit vector pointing at `degrees`.
#[must_use]
pub fn angle_to_direction(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Angle of `direction` in `[0, 360)`.
///
/// # Panics
///
/// Panics if `direction` is zero or not finite.
#[must_use]
pub fn direction_to_degrees(direction: Vec2) -> f32 {
    let direction = unit_direction(direction);
    normalize_degrees(direction.y.atan2(direction.x).to_degrees())
}

/// Wrap any finite angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative angle rounds up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Push direction for a board rotated by `tilt_degrees`.
///
/// An upright board (tilt 0) pushes straight down.
#[must_use]
pub fn tilt_to_direction(tilt_degrees: f32) -> Vec2 {
    angle_to_direction(normalize_degrees(tilt_degrees - 90.0))
}

/// Normalized `direction`.
///
/// # Panics
///
/// Panics if `direction` is zero or not finite. Callers holding untrusted
/// input go through [`checked_direction`] first.
#[must_use]
pub fn unit_direction(direction: Vec2) -> Vec2 {
    match try_unit(direction) {
        Some(unit) => unit,
        None => panic!("push direction {direction} is zero or not finite"),
    }
}

/// Validate a push direction, returning it normalized.
pub fn checked_direction(direction: Vec2) -> Result<Vec2, GeometryError> {
    try_unit(direction).ok_or(GeometryError::DegenerateDirection(direction))
}

// Rescaled by the largest component first so huge or tiny pushes do not
// overflow or underflow the squared length.
fn try_unit(direction: Vec2) -> Option<Vec2> {
    if !direction.is_finite() || direction == Vec2::ZERO {
        return None;
    }
    (direction / direction.abs().max_element()).try_normalize()
}
