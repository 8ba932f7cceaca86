//! 2D vector type used throughout the kernel
//!
//! `NVec2` is a plain nalgebra vector, so add/subtract/scale/dot/length are the
//! usual operators and `dot`/`norm`. It is `Copy`: every body field owns its
//! own value and no two fields can alias.
//!
//! [`Planar`] adds the few planar helpers nalgebra doesn't name directly.

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

pub trait Planar {
    /// Counter-clockwise perpendicular `(-y, x)`
    fn perp_ccw(&self) -> NVec2;

    /// Vector of length `magnitude` pointing at `angle` radians from +x
    fn from_polar(magnitude: f64, angle: f64) -> NVec2;

    /// `self += v * s`, mutating the receiver in place
    fn add_scaled(&mut self, v: &NVec2, s: f64);
}

impl Planar for NVec2 {
    fn perp_ccw(&self) -> NVec2 {
        NVec2::new(-self.y, self.x)
    }

    fn from_polar(magnitude: f64, angle: f64) -> NVec2 {
        NVec2::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    fn add_scaled(&mut self, v: &NVec2, s: f64) {
        self.x += v.x * s;
        self.y += v.y * s;
    }
}

/// Build an `NVec2` from a config slice, which must have exactly two entries
pub fn vec2_from_slice(values: &[f64]) -> Option<NVec2> {
    match values {
        [x, y] => Some(NVec2::new(*x, *y)),
        _ => None,
    }
}
