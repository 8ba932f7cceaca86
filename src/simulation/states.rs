//! Core state types for the circle simulation.
//!
//! - `Body`     circular mass point, the only thing that moves
//! - `Segment`  static line segment (walls of the house scene)
//! - `Wire`     circular wire the beads are constrained to
//! - `Bounds`   rectangular simulation area `[0, width] x [0, height]`
//! - `World`    everything above plus the elapsed time `t`
//! - `Circle`   detection-only shape used by the benchmark
//!
//! Bodies and circles both implement [`Collidable`], the view the broad phase
//! works over.

use super::vector::{NVec2, Planar};
use crate::error::{SimError, SimResult};

pub type Color = [u8; 3];

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2,      // position
    pub v: NVec2,      // velocity
    pub x_prev: NVec2, // position at the start of the last constrained sub-step
    pub radius: f64,
    pub m: f64, // mass
    pub color: Color,
    pub flash: f64, // seconds left of collision highlight
}

impl Body {
    /// Create a body, rejecting non-positive or non-finite radius and mass
    pub fn new(x: NVec2, v: NVec2, radius: f64, m: f64) -> SimResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidBody(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidBody(format!(
                "mass must be positive and finite, got {m}"
            )));
        }
        Ok(Self {
            x,
            v,
            x_prev: x,
            radius,
            m,
            color: [255, 255, 255],
            flash: 0.0,
        })
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// Immutable line segment, `p1 != p2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    p1: NVec2,
    p2: NVec2,
}

impl Segment {
    pub fn new(p1: NVec2, p2: NVec2) -> SimResult<Self> {
        if (p2 - p1).norm_squared() == 0.0 {
            return Err(SimError::InvalidGeometry(format!(
                "segment endpoints coincide at ({}, {})",
                p1.x, p1.y
            )));
        }
        Ok(Self { p1, p2 })
    }

    pub fn p1(&self) -> NVec2 {
        self.p1
    }

    pub fn p2(&self) -> NVec2 {
        self.p2
    }

    /// Closest point on the segment to `p` (projection clamped to `t in [0, 1]`)
    pub fn closest_point(&self, p: NVec2) -> NVec2 {
        let line = self.p2 - self.p1;
        let t = ((p - self.p1).dot(&line) / line.norm_squared()).clamp(0.0, 1.0);
        self.p1 + t * line
    }

    /// Unit normal (counter-clockwise perpendicular of `p2 - p1`)
    pub fn normal(&self) -> NVec2 {
        let line = self.p2 - self.p1;
        line.perp_ccw() / line.norm()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    pub center: NVec2,
    pub radius: f64,
}

impl Wire {
    pub fn new(center: NVec2, radius: f64) -> SimResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidGeometry(format!(
                "wire radius must be positive, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Point on the wire at `angle` radians
    pub fn point_at(&self, angle: f64) -> NVec2 {
        self.center + self.radius * NVec2::new(angle.cos(), angle.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> SimResult<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(SimError::InvalidGeometry(format!(
                "bounds must be positive, got {width} x {height}"
            )));
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone, Default)]
pub struct World {
    pub bodies: Vec<Body>,       // ordered, index is identity
    pub segments: Vec<Segment>,  // static geometry
    pub wire: Option<Wire>,      // constrained scenes only
    pub bounds: Option<Bounds>,  // simulation area
    pub t: f64,                  // elapsed time
}

impl World {
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

/// Index pair into the body sequence, always `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
}

impl CandidatePair {
    pub fn new(i: usize, j: usize) -> Self {
        if i < j {
            Self { a: i, b: j }
        } else {
            Self { a: j, b: i }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: NVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: NVec2::new(x, y),
            radius,
        }
    }
}

/// Anything the broad phase can test: a center and a radius
pub trait Collidable {
    fn center(&self) -> NVec2;
    fn radius(&self) -> f64;

    fn left(&self) -> f64 {
        self.center().x - self.radius()
    }

    fn right(&self) -> f64 {
        self.center().x + self.radius()
    }
}

impl Collidable for Circle {
    fn center(&self) -> NVec2 {
        self.center
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Collidable for Body {
    fn center(&self) -> NVec2 {
        self.x
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

/// Exact circle-circle overlap test, strict: touching circles don't overlap
pub fn overlaps<A: Collidable + ?Sized, B: Collidable + ?Sized>(a: &A, b: &B) -> bool {
    let d = a.center() - b.center();
    let r = a.radius() + b.radius();
    d.norm_squared() < r * r
}

/// Mutable references to two distinct bodies
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "a body can't collide with itself");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
