//! Acceleration contributors for free-flying bodies
//!
//! An acceleration term is a pure function of one body's position and
//! velocity. Terms are collected in an [`AccelSet`] and summed, which is the
//! field the RK4 integrator samples.

use super::params::Parameters;
use super::vector::NVec2;

/// Collection of acceleration terms (gravity, drag, ...)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// The free-flight field: uniform gravity plus quadratic drag.
    /// Drag is left out when its coefficient is zero
    pub fn free_flight(params: &Parameters) -> Self {
        let set = Self::new().with(Gravity { g: params.gravity });
        if params.air_resistance > 0.0 {
            set.with(QuadraticDrag {
                coefficient: params.air_resistance,
            })
        } else {
            set
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total acceleration at position `x` with velocity `v`
    pub fn accel(&self, x: NVec2, v: NVec2) -> NVec2 {
        self.terms
            .iter()
            .fold(NVec2::zeros(), |acc, term| acc + term.acceleration(x, v))
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Acceleration source evaluated per body
pub trait Acceleration {
    fn acceleration(&self, x: NVec2, v: NVec2) -> NVec2;
}

/// Uniform gravitational field
pub struct Gravity {
    pub g: NVec2,
}

impl Acceleration for Gravity {
    fn acceleration(&self, _x: NVec2, _v: NVec2) -> NVec2 {
        self.g
    }
}

/// Air resistance opposing velocity, magnitude `coefficient * |v|^2`
pub struct QuadraticDrag {
    pub coefficient: f64,
}

impl Acceleration for QuadraticDrag {
    fn acceleration(&self, _x: NVec2, v: NVec2) -> NVec2 {
        // |v| * v is zero at rest, no division involved
        -self.coefficient * v.norm() * v
    }
}
