//! Position-based constraint keeping a body on a circular wire

use super::states::{Body, Wire};

/// Project `body` onto `wire`.
///
/// Moves the position along the radial direction by `wire.radius - d`, where
/// `d` is the current distance from the wire center, and returns that signed
/// correction. A body sitting exactly on the center has no radial direction;
/// the call then does nothing and returns `None`.
pub fn keep_on_wire(body: &mut Body, wire: &Wire) -> Option<f64> {
    let radial = body.x - wire.center;
    let d = radial.norm();
    if d == 0.0 {
        return None;
    }
    let lambda = wire.radius - d;
    body.x += (lambda / d) * radial;
    Some(lambda)
}
