//! Input events and the `InputSource` boundary
//!
//! Whatever maps mouse buttons or keys to events lives outside the crate. The
//! core only sees discrete [`InputEvent`]s, each applied to the scenario as one
//! atomic mutation between ticks.

use std::f64::consts::TAU;

use rand::Rng;

use super::states::Body;
use super::vector::{NVec2, Planar};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KickUp,               // +K along y for every body
    KickRandom,           // random magnitude in [min, max], random angle, per body
    KickAngle(f64),       // K at a fixed angle in degrees, e.g. 45 or 135
    Reset,                // rebuild the body sequence
    ToggleBroadPhase,     // brute force <-> sweep and prune
}

/// Source of events, polled once before every tick
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent>;
}

/// Never produces anything
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _tick: u64) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Replays a fixed list of `(tick, event)`
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: Vec<(u64, InputEvent)>,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<(u64, InputEvent)>) -> Self {
        // stable, so same-tick events keep their script order
        events.sort_by_key(|(tick, _)| *tick);
        Self { events }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> Vec<InputEvent> {
        self.events
            .iter()
            .filter(|(t, _)| *t == tick)
            .map(|(_, e)| *e)
            .collect()
    }
}

pub fn kick_up(bodies: &mut [Body], force: f64) {
    for b in bodies.iter_mut() {
        b.v.y += force;
    }
}

pub fn kick_angle(bodies: &mut [Body], force: f64, angle_deg: f64) {
    let kick = NVec2::from_polar(force, angle_deg.to_radians());
    for b in bodies.iter_mut() {
        b.v += kick;
    }
}

pub fn kick_random<R: Rng>(bodies: &mut [Body], rng: &mut R, min: f64, max: f64) {
    for b in bodies.iter_mut() {
        let angle = rng.gen_range(0.0..TAU);
        let force = rng.gen_range(min..=max);
        b.v += NVec2::from_polar(force, angle);
    }
}
