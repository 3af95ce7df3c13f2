//! Math utilities for board geometry and the top-down camera.
//!
//! This module provides the small vector and matrix types the layout generator and
//! the renderer share. All types are `bytemuck::Pod` so they can be uploaded to the
//! GPU without conversion.
//!
//! # Module Organization
//!
//! - [`vec`] module contains [`Vec2`](vec::Vec2) and [`Vec3`](vec::Vec3)
//! - [`mat`] module contains the column-major [`Mat4`](mat::Mat4)
//! - Angle conversion helpers live at the root

pub mod mat;
pub mod vec;

pub use mat::Mat4;
pub use vec::{Vec2, Vec3};

/// Converts degrees to radians.
///
/// Whole turns are removed first; the result keeps the sign of the input, so it
/// lies in (-2π, 2π).
///
/// # Example
/// ```
/// use pachisi::math::deg_to_rad;
///
/// assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
/// assert!((deg_to_rad(540.0) - std::f32::consts::PI).abs() < 1e-6);
/// assert!((deg_to_rad(-90.0) + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    (degrees % 360.0) * (std::f32::consts::PI / 180.0)
}
