//! Renderer boundary
//!
//! The simulation never draws. Each tick it hands a read-only [`Frame`] in
//! simulation coordinates to whatever [`Renderer`] the caller plugged in; a
//! windowed renderer maps those to pixels with a [`Viewport`]. Running with no
//! renderer at all changes nothing in the physics.

pub mod headless;

use crate::simulation::scenario::{Scenario, TickStats};
use crate::simulation::states::{Body, Bounds, Segment, Wire};
use crate::simulation::vector::NVec2;

/// Read-only view of the world after a tick
pub struct Frame<'a> {
    pub tick: u64,
    pub t: f64,
    pub bodies: &'a [Body],
    pub segments: &'a [Segment],
    pub wire: Option<&'a Wire>,
    pub bounds: Option<&'a Bounds>,
    pub stats: TickStats,
    pub broad_phase: &'static str,
}

impl<'a> Frame<'a> {
    pub fn of(scenario: &'a Scenario) -> Self {
        let world = &scenario.world;
        Self {
            tick: scenario.last_stats().tick,
            t: world.t,
            bodies: &world.bodies,
            segments: &world.segments,
            wire: world.wire.as_ref(),
            bounds: world.bounds.as_ref(),
            stats: scenario.last_stats(),
            broad_phase: scenario.broad_phase_name(),
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Uniform scale plus vertical flip from simulation space to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,         // pixels per simulation unit
    pub screen_height: f64, // pixels
}

impl Viewport {
    /// Fit `sim_min_width` units across the shorter side of the screen
    pub fn fit(screen_width: f64, screen_height: f64, sim_min_width: f64) -> Self {
        Self {
            scale: screen_width.min(screen_height) / sim_min_width,
            screen_height,
        }
    }

    /// Simulation-space size of the whole screen
    pub fn sim_size(&self, screen_width: f64) -> (f64, f64) {
        (screen_width / self.scale, self.screen_height / self.scale)
    }

    pub fn to_pixels(&self, p: NVec2) -> (i32, i32) {
        (
            (p.x * self.scale) as i32,
            (self.screen_height - p.y * self.scale) as i32,
        )
    }

    pub fn length_to_pixels(&self, len: f64) -> i32 {
        (len * self.scale) as i32
    }
}
