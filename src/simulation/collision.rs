//! Collision response between bodies, and against static geometry
//!
//! Body pairs are resolved in two forms sharing the same contact geometry:
//!
//! - **bead form** ([`resolve_bead_pair`]): 1-D collision along the contact
//!   normal with restitution, weighted by mass; only the normal component of
//!   each velocity changes.
//! - **impulse form** ([`resolve_impulse_pair`]): impulse `j` along the normal,
//!   applied only when the pair is approaching.
//!
//! Both push the two bodies apart by half the overlap each. Degenerate
//! contacts (coincident centers) are skipped.

use log::warn;

use super::states::{pair_mut, Body, Bounds, Segment};
use super::vector::NVec2;

/// Which velocity response to use for body pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairResponse {
    Bead,
    Impulse,
}

/// Unit normal from `b1` to `b2` and center distance, if the circles overlap.
/// Coincident centers give no normal and count as no contact
pub fn contact_normal(b1: &Body, b2: &Body) -> Option<(NVec2, f64)> {
    let dir = b2.x - b1.x;
    let d = dir.norm();
    if d == 0.0 || d >= b1.radius + b2.radius {
        return None;
    }
    Some((dir / d, d))
}

/// Push the bodies apart along `n` by half the overlap each
fn separate(b1: &mut Body, b2: &mut Body, n: NVec2, d: f64) {
    let overlap = (b1.radius + b2.radius - d) / 2.0;
    b1.x -= overlap * n;
    b2.x += overlap * n;
}

/// Bead-form response. Returns whether the pair was in contact
pub fn resolve_bead_pair(b1: &mut Body, b2: &mut Body, restitution: f64) -> bool {
    let Some((n, d)) = contact_normal(b1, b2) else {
        return false;
    };
    separate(b1, b2, n, d);

    let v1 = b1.v.dot(&n);
    let v2 = b2.v.dot(&n);
    let (m1, m2) = (b1.m, b2.m);
    let momentum = m1 * v1 + m2 * v2;
    let new_v1 = (momentum - m2 * (v1 - v2) * restitution) / (m1 + m2);
    let new_v2 = (momentum - m1 * (v2 - v1) * restitution) / (m1 + m2);

    b1.v += (new_v1 - v1) * n;
    b2.v += (new_v2 - v2) * n;
    true
}

/// Impulse-form response. Returns `false`, touching nothing, when the bodies
/// don't overlap or are already separating along the normal
pub fn resolve_impulse_pair(b1: &mut Body, b2: &mut Body, restitution: f64) -> bool {
    let Some((n, d)) = contact_normal(b1, b2) else {
        return false;
    };
    let vn = (b2.v - b1.v).dot(&n);
    if vn >= 0.0 {
        return false;
    }

    let j = -(1.0 + restitution) * vn / (1.0 / b1.m + 1.0 / b2.m);
    b1.v -= (j / b1.m) * n;
    b2.v += (j / b2.m) * n;

    separate(b1, b2, n, d);
    true
}

/// Resolve bodies `i` and `j` (in that role order) with the given response
pub fn resolve_pair(
    bodies: &mut [Body],
    i: usize,
    j: usize,
    response: PairResponse,
    restitution: f64,
) -> bool {
    let (b1, b2) = pair_mut(bodies, i, j);
    match response {
        PairResponse::Bead => resolve_bead_pair(b1, b2, restitution),
        PairResponse::Impulse => resolve_impulse_pair(b1, b2, restitution),
    }
}

/// Resolve every unordered pair once, `i` ascending and `j < i` ascending,
/// with `i` taking the first role. Returns the number of contacts resolved
pub fn resolve_all_pairs(bodies: &mut [Body], response: PairResponse, restitution: f64) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        for j in 0..i {
            if resolve_pair(bodies, i, j, response, restitution) {
                resolved += 1;
            }
        }
    }
    resolved
}

/// Resolve every unordered pair once in combination order: `i` ascending and
/// `j > i` ascending, with `i` taking the first role
pub fn resolve_combinations(bodies: &mut [Body], response: PairResponse, restitution: f64) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if resolve_pair(bodies, i, j, response, restitution) {
                resolved += 1;
            }
        }
    }
    resolved
}

/// Outcome of testing one body against one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentContact {
    None,
    Resolved,
    /// Body center lies on the segment: no outward direction, contact skipped
    Degenerate,
}

/// Reflect and reposition `body` if it penetrates `segment`.
///
/// Velocity is mirrored about the segment normal and scaled by `bounciness`;
/// the body is then placed `radius` away from the closest point, on the side
/// its center was on.
pub fn collide_segment(body: &mut Body, segment: &Segment, bounciness: f64) -> SegmentContact {
    let closest = segment.closest_point(body.x);
    let offset = body.x - closest;
    let dist = offset.norm();
    if dist >= body.radius {
        return SegmentContact::None;
    }
    if dist == 0.0 {
        return SegmentContact::Degenerate;
    }

    let n = segment.normal();
    body.v = (body.v - 2.0 * body.v.dot(&n) * n) * bounciness;
    body.x = closest + (body.radius / dist) * offset;
    SegmentContact::Resolved
}

/// Test `body` against every segment in order
pub fn collide_segments(body: &mut Body, segments: &[Segment], bounciness: f64) -> usize {
    let mut hits = 0;
    for (k, segment) in segments.iter().enumerate() {
        match collide_segment(body, segment, bounciness) {
            SegmentContact::Resolved => hits += 1,
            SegmentContact::Degenerate => {
                warn!(
                    "body center ({:.4}, {:.4}) lies on segment {k}; contact skipped",
                    body.x.x, body.x.y
                );
            }
            SegmentContact::None => {}
        }
    }
    hits
}

/// Clamp the body center into `bounds`, reversing and damping the velocity of
/// every clamped axis
pub fn clamp_to_bounds(body: &mut Body, bounds: &Bounds, bounciness: f64) -> bool {
    let mut hit = false;
    if body.x.x < 0.0 {
        body.x.x = 0.0;
        body.v.x *= -bounciness;
        hit = true;
    }
    if body.x.x > bounds.width {
        body.x.x = bounds.width;
        body.v.x *= -bounciness;
        hit = true;
    }
    if body.x.y < 0.0 {
        body.x.y = 0.0;
        body.v.y *= -bounciness;
        hit = true;
    }
    if body.x.y > bounds.height {
        body.x.y = bounds.height;
        body.v.y *= -bounciness;
        hit = true;
    }
    hit
}

/// Reverse the velocity component heading out through a wall the body's
/// circle has crossed. Position is left as is
pub fn bounce_off_walls(body: &mut Body, bounds: &Bounds) -> bool {
    let mut hit = false;
    let r = body.radius;
    if (body.x.x - r < 0.0 && body.v.x < 0.0) || (body.x.x + r > bounds.width && body.v.x > 0.0) {
        body.v.x = -body.v.x;
        hit = true;
    }
    if (body.x.y - r < 0.0 && body.v.y < 0.0) || (body.x.y + r > bounds.height && body.v.y > 0.0) {
        body.v.y = -body.v.y;
        hit = true;
    }
    hit
}
