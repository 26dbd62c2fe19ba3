//! Angle helpers and screen-space heading math on top of `glam::Vec2`.

use glam::Vec2;

pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = std::f32::consts::TAU;
pub const PI_OVER_2: f32 = std::f32::consts::FRAC_PI_2;

/// Default tolerance for [`near_zero`].
pub const EPSILON: f32 = 0.001;

pub fn to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

pub fn to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Whether `value` is within `epsilon` of zero.
pub fn near_zero(value: f32, epsilon: f32) -> bool {
    value.abs() <= epsilon
}

/// Unit heading for a rotation in screen space (+y points down),
/// so a positive rotation turns counter-clockwise on screen.
pub fn forward(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), -rotation.sin())
}
