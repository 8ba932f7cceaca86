//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – scene kind and broad-phase selection
//! - [`ParametersConfig`] – time step, gravity, drag, restitution, kicks, seed
//! - static geometry      – `bounds`, `wire`, `segments`
//! - bodies               – explicit [`BodyConfig`]s, plus optional generators
//!   ([`RandomBodiesConfig`] for the ball pit, [`BeadsConfig`] for the wire)
//! - [`EventConfig`]      – scripted input events
//!
//! # YAML format
//! A wire scene matching these types:
//!
//! ```yaml
//! engine:
//!   kind: "wire"              # free_flight | wire | ball_pit
//!
//! parameters:
//!   dt: 0.016666666666666666
//!   substeps: 100
//!   gravity: [0.0, -10.0]
//!   restitution: 1.0
//!   seed: 7
//!
//! wire:
//!   center: [1.3333, 1.0]
//!   radius: 0.8
//!
//! beads:
//!   count: 5
//!   first_radius: 0.1
//!   radius_min: 0.05
//!   radius_max: 0.15
//!
//! events:
//!   - tick: 120
//!     event: reset
//! ```
//!
//! Everything is checked by [`ScenarioConfig::validate`] before a scenario is
//! built from it; the runtime types then never see a bad value.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{SimError, SimResult};
use crate::simulation::vector::{vec2_from_slice, NVec2};

/// Which scene the engine steps
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindConfig {
    #[serde(rename = "free_flight")] // RK4 balls with drag, house segments and bounds
    FreeFlight,

    #[serde(rename = "wire")] // beads on a circular wire, sub-stepped position-based integration
    Wire,

    #[serde(rename = "ball_pit")] // drifting balls in a box, broad phase + impulse response
    BallPit,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadPhaseConfig {
    #[serde(rename = "brute_force")]
    BruteForce,

    #[default]
    #[serde(rename = "sweep_and_prune")]
    SweepAndPrune,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub kind: KindConfig,
    #[serde(default)]
    pub broad_phase: BroadPhaseConfig, // starting strategy (ball pit)
    #[serde(default)]
    pub vertical_filter: bool, // sweep-and-prune |dy| early-out
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,             // outer time step
    pub substeps: u32,       // constrained sub-steps per tick
    pub gravity: Vec<f64>,   // [gx, gy]
    pub air_resistance: f64, // quadratic drag coefficient
    pub bounciness: f64,     // walls and segments
    pub restitution: f64,    // body pairs
    pub kick_force: f64,
    pub kick_force_min: f64,
    pub kick_force_max: f64,
    pub flash_time: f64,
    pub seed: u64, // makes random bodies and kicks reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            substeps: 1,
            gravity: vec![0.0, -9.8],
            air_resistance: 0.0,
            bounciness: 1.0,
            restitution: 1.0,
            kick_force: 10.0,
            kick_force_min: 0.0,
            kick_force_max: 30.0,
            flash_time: 0.12,
            seed: 42,
        }
    }
}

/// Initial state of a single body.
///
/// Velocity is either given directly as `v`, or as a launch `speed` at
/// `angle_deg` from +x. Without either the body starts at rest
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>,
    #[serde(default)]
    pub v: Option<Vec<f64>>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub angle_deg: Option<f64>,
    pub m: f64,
    pub radius: f64,
    #[serde(default)]
    pub color: Option<[u8; 3]>, // random when absent
}

impl BodyConfig {
    pub fn velocity(&self) -> SimResult<NVec2> {
        match (&self.v, self.speed, self.angle_deg) {
            (Some(v), None, None) => vec2_from_slice(v)
                .ok_or_else(|| SimError::InvalidBody(format!("`v` needs 2 components, got {}", v.len()))),
            (None, Some(speed), Some(angle)) => {
                let a = angle.to_radians();
                Ok(NVec2::new(speed * a.cos(), speed * a.sin()))
            }
            (None, None, None) => Ok(NVec2::zeros()),
            _ => Err(SimError::InvalidBody(
                "give either `v` or both `speed` and `angle_deg`".to_string(),
            )),
        }
    }
}

/// `count` balls at uniform positions inside the bounds, uniform radius in
/// `[radius_min, radius_max]`, mass `pi r^2`, each velocity component uniform
/// in `[-speed_max, speed_max]`
#[derive(Deserialize, Debug, Clone)]
pub struct RandomBodiesConfig {
    pub count: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    #[serde(default)]
    pub speed_max: f64,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

/// `count` beads spread over half the wire (angle step `pi / count`), mass
/// `pi r^2`; the first bead has `first_radius`, the rest a uniform radius in
/// `[radius_min, radius_max]`
#[derive(Deserialize, Debug, Clone)]
pub struct BeadsConfig {
    pub count: usize,
    pub first_radius: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SegmentConfig {
    pub p1: Vec<f64>,
    pub p2: Vec<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WireConfig {
    pub center: Vec<f64>,
    pub radius: f64,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct BoundsConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventName {
    #[serde(rename = "kick_up")]
    KickUp,
    #[serde(rename = "kick_random")]
    KickRandom,
    #[serde(rename = "kick_angle")]
    KickAngle,
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "toggle_broad_phase")]
    ToggleBroadPhase,
}

/// One scripted input event; `angle_deg` is required by `kick_angle` only
#[derive(Deserialize, Debug, Clone)]
pub struct EventConfig {
    pub tick: u64,
    pub event: EventName,
    #[serde(default)]
    pub angle_deg: Option<f64>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bounds: Option<BoundsConfig>,
    #[serde(default)]
    pub wire: Option<WireConfig>,
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub random_bodies: Option<RandomBodiesConfig>,
    #[serde(default)]
    pub beads: Option<BeadsConfig>,
    #[serde(default)]
    pub events: Vec<EventConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reject everything that would make a body, the geometry or the time
    /// stepping invalid
    pub fn validate(&self) -> SimResult<()> {
        let p = &self.parameters;
        if vec2_from_slice(&p.gravity).is_none() {
            return Err(SimError::parameter("gravity", "needs 2 components"));
        }

        for (k, b) in self.bodies.iter().enumerate() {
            if vec2_from_slice(&b.x).is_none() {
                return Err(SimError::InvalidBody(format!("body {k}: `x` needs 2 components")));
            }
            let v = b.velocity()?;
            if !(b.x.iter().all(|c| c.is_finite()) && v.x.is_finite() && v.y.is_finite()) {
                return Err(SimError::InvalidBody(format!("body {k}: position and velocity must be finite")));
            }
            if !(b.radius > 0.0 && b.m > 0.0) {
                return Err(SimError::InvalidBody(format!(
                    "body {k}: radius and mass must be positive, got r={} m={}",
                    b.radius, b.m
                )));
            }
        }

        if let Some(r) = &self.random_bodies {
            if !(r.radius_min > 0.0 && r.radius_min <= r.radius_max && r.radius_max.is_finite()) {
                return Err(SimError::InvalidBody(format!(
                    "random bodies: need 0 < radius_min <= radius_max < inf, got [{}, {}]",
                    r.radius_min, r.radius_max
                )));
            }
            if !(r.speed_max >= 0.0 && r.speed_max.is_finite()) {
                return Err(SimError::parameter(
                    "speed_max",
                    format!("must be finite and non-negative, got {}", r.speed_max),
                ));
            }
            if self.bounds.is_none() {
                return Err(SimError::InvalidGeometry(
                    "random bodies need `bounds` to be placed in".to_string(),
                ));
            }
        }

        if let Some(b) = &self.beads {
            let radii_ok = b.first_radius > 0.0
                && b.first_radius.is_finite()
                && b.radius_min > 0.0
                && b.radius_min <= b.radius_max
                && b.radius_max.is_finite();
            if !radii_ok {
                return Err(SimError::InvalidBody(format!(
                    "beads: need finite positive radii with radius_min <= radius_max, got first={} [{}, {}]",
                    b.first_radius, b.radius_min, b.radius_max
                )));
            }
            if self.wire.is_none() {
                return Err(SimError::MissingWire);
            }
        }

        if self.engine.kind == KindConfig::Wire && self.wire.is_none() {
            return Err(SimError::MissingWire);
        }

        for e in &self.events {
            if e.event == EventName::KickAngle && e.angle_deg.is_none() {
                return Err(SimError::parameter(
                    "angle_deg",
                    format!("kick_angle at tick {} needs an angle", e.tick),
                ));
            }
        }

        // geometry and parameter ranges are checked by the runtime constructors
        self.to_parameters()?.validate()?;
        Ok(())
    }

    pub(crate) fn to_parameters(&self) -> SimResult<crate::simulation::params::Parameters> {
        let p = &self.parameters;
        let gravity = vec2_from_slice(&p.gravity)
            .ok_or_else(|| SimError::parameter("gravity", "needs 2 components"))?;
        Ok(crate::simulation::params::Parameters {
            dt: p.dt,
            substeps: p.substeps,
            gravity,
            air_resistance: p.air_resistance,
            bounciness: p.bounciness,
            restitution: p.restitution,
            kick_force: p.kick_force,
            kick_force_min: p.kick_force_min,
            kick_force_max: p.kick_force_max,
            flash_time: p.flash_time,
            seed: p.seed,
        })
    }
}
