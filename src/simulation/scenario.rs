//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a validated `ScenarioConfig` and produces the runtime bundle that owns
//! everything a run needs:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - world state (`World`: bodies, segments, wire, bounds, time)
//! - the free-flight force set (`AccelSet`)
//! - the broad-phase detector and a seeded RNG
//!
//! `Scenario::step` advances one tick; `Scenario::apply_event` mutates state
//! between ticks. Reset rebuilds the body sequence from the same config.

use std::f64::consts::PI;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{EventConfig, EventName, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::broad_phase::{BroadPhase, Detector};
use crate::simulation::collision::{
    bounce_off_walls, clamp_to_bounds, collide_segments, resolve_combinations, resolve_pair, PairResponse,
};
use crate::simulation::engine::{Engine, SimulationKind};
use crate::simulation::forces::AccelSet;
use crate::simulation::input::{kick_angle, kick_random, kick_up, InputEvent};
use crate::simulation::integrator::{drift_integrator, rk4_integrator, substep_integrator};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Bounds, CandidatePair, Color, Segment, Wire, World};
use crate::simulation::vector::{vec2_from_slice, NVec2};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick: u64,
    pub checks: usize,       // broad-phase pair checks
    pub overlaps: usize,     // pairs found overlapping by the broad phase
    pub collisions: usize,   // body pairs actually resolved
    pub segment_hits: usize, // body/segment contacts
    pub wall_hits: usize,    // body/bounds contacts
}

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub world: World,
    pub forces: AccelSet,
    detector: Detector,
    pairs: Vec<CandidatePair>,
    rng: StdRng,
    config: ScenarioConfig,
    tick: u64,
    last: TickStats,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        cfg.validate()?;

        let parameters = cfg.to_parameters()?;
        let engine = Engine::from(&cfg.engine);
        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let world = build_world(&cfg, &mut rng)?;
        let forces = AccelSet::free_flight(&parameters);
        let detector = Detector::new(engine.broad_phase, engine.vertical_filter);

        info!(
            "built scenario {:?}: {:?}, {} bodies, {} segments",
            cfg.name.as_deref().unwrap_or("unnamed"),
            engine.kind,
            world.bodies.len(),
            world.segments.len()
        );

        Ok(Self {
            engine,
            parameters,
            world,
            forces,
            detector,
            pairs: Vec::new(),
            rng,
            config: cfg,
            tick: 0,
            last: TickStats::default(),
        })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_stats(&self) -> TickStats {
        self.last
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Name of the broad phase the ball pit is currently using
    pub fn broad_phase_name(&self) -> &'static str {
        self.detector.name()
    }

    /// The scripted events from the config, in input-event form
    pub fn scripted_events(&self) -> Vec<(u64, InputEvent)> {
        self.config.events.iter().map(event_from_config).collect()
    }

    /// Advance one tick
    pub fn step(&mut self) -> TickStats {
        let mut stats = TickStats {
            tick: self.tick,
            ..TickStats::default()
        };

        match self.engine.kind {
            SimulationKind::FreeFlight => self.step_free_flight(&mut stats),
            SimulationKind::Wire => self.step_wire(&mut stats),
            SimulationKind::BallPit => self.step_ball_pit(&mut stats),
        }

        debug!(
            "tick {}: t={:.4} checks={} collisions={}",
            stats.tick, self.world.t, stats.checks, stats.collisions
        );
        self.tick += 1;
        self.last = stats;
        stats
    }

    /// Sub-stepped beads; every sub-step tests all pairs
    fn step_wire(&mut self, stats: &mut TickStats) {
        let n = self.world.bodies.len();
        stats.checks = self.parameters.substeps as usize * (n * n.saturating_sub(1) / 2);
        stats.collisions = substep_integrator(&mut self.world, &self.parameters);
    }

    /// RK4 each ball, then segments and bounds per ball, then every pair
    fn step_free_flight(&mut self, stats: &mut TickStats) {
        rk4_integrator(&mut self.world, &self.forces, &self.parameters);

        let bounciness = self.parameters.bounciness;
        let bounds = self.world.bounds;
        let World { bodies, segments, .. } = &mut self.world;
        for b in bodies.iter_mut() {
            stats.segment_hits += collide_segments(b, segments.as_slice(), bounciness);
            if let Some(bounds) = &bounds {
                if clamp_to_bounds(b, bounds, bounciness) {
                    stats.wall_hits += 1;
                }
            }
        }

        let n = bodies.len();
        stats.checks = n * n.saturating_sub(1) / 2;
        stats.collisions = resolve_combinations(bodies, PairResponse::Bead, self.parameters.restitution);
    }

    /// Drift, bounce off the box, then broad phase and impulse response
    fn step_ball_pit(&mut self, stats: &mut TickStats) {
        let dt = self.parameters.dt;
        let flash_time = self.parameters.flash_time;
        for b in self.world.bodies.iter_mut() {
            b.flash = (b.flash - dt).max(0.0);
        }

        drift_integrator(&mut self.world, &self.parameters);

        if let Some(bounds) = self.world.bounds {
            for b in self.world.bodies.iter_mut() {
                if bounce_off_walls(b, &bounds) {
                    b.flash = flash_time;
                    stats.wall_hits += 1;
                }
            }
        }

        let detection = self.detector.find_pairs(&self.world.bodies, &mut self.pairs);
        stats.checks = detection.checks;
        stats.overlaps = detection.collisions;

        let restitution = self.parameters.restitution;
        for pair in &self.pairs {
            let bodies = &mut self.world.bodies;
            if resolve_pair(bodies, pair.a, pair.b, PairResponse::Impulse, restitution) {
                bodies[pair.a].flash = flash_time;
                bodies[pair.b].flash = flash_time;
                stats.collisions += 1;
            }
        }
    }

    /// Apply one input event. Reset is the only event that can fail, and then
    /// leaves the current world untouched
    pub fn apply_event(&mut self, event: InputEvent) -> SimResult<()> {
        let p = &self.parameters;
        match event {
            InputEvent::KickUp => kick_up(&mut self.world.bodies, p.kick_force),
            InputEvent::KickAngle(angle) => kick_angle(&mut self.world.bodies, p.kick_force, angle),
            InputEvent::KickRandom => {
                let (min, max) = (p.kick_force_min, p.kick_force_max);
                kick_random(&mut self.world.bodies, &mut self.rng, min, max);
            }
            InputEvent::Reset => self.reset()?,
            InputEvent::ToggleBroadPhase => {
                self.detector.toggle();
                info!("broad phase switched to {}", self.detector.name());
            }
        }
        Ok(())
    }

    /// Replace the body sequence wholesale; random bodies are re-sampled
    pub fn reset(&mut self) -> SimResult<()> {
        let world = build_world(&self.config, &mut self.rng)?;
        self.world = world;
        info!("scenario reset, {} bodies", self.world.bodies.len());
        Ok(())
    }
}

fn event_from_config(e: &EventConfig) -> (u64, InputEvent) {
    let event = match e.event {
        EventName::KickUp => InputEvent::KickUp,
        EventName::KickRandom => InputEvent::KickRandom,
        // presence is checked by validate
        EventName::KickAngle => InputEvent::KickAngle(e.angle_deg.unwrap_or(45.0)),
        EventName::Reset => InputEvent::Reset,
        EventName::ToggleBroadPhase => InputEvent::ToggleBroadPhase,
    };
    (e.tick, event)
}

fn random_color<R: Rng>(rng: &mut R) -> Color {
    [rng.gen_range(50..255), rng.gen_range(50..255), rng.gen_range(50..255)]
}

fn vec2(values: &[f64], what: &str) -> SimResult<NVec2> {
    vec2_from_slice(values)
        .ok_or_else(|| SimError::InvalidGeometry(format!("{what} needs 2 components, got {}", values.len())))
}

/// Build the world described by `cfg`, drawing random values from `rng`
fn build_world<R: Rng>(cfg: &ScenarioConfig, rng: &mut R) -> SimResult<World> {
    let bounds = cfg
        .bounds
        .map(|b| Bounds::new(b.width, b.height))
        .transpose()?;
    let wire = cfg
        .wire
        .as_ref()
        .map(|w| Wire::new(vec2(&w.center, "wire center")?, w.radius))
        .transpose()?;
    let segments = cfg
        .segments
        .iter()
        .map(|s| Segment::new(vec2(&s.p1, "segment p1")?, vec2(&s.p2, "segment p2")?))
        .collect::<SimResult<Vec<_>>>()?;

    let mut bodies = Vec::new();
    for bc in &cfg.bodies {
        let color = match bc.color {
            Some(c) => c,
            None => random_color(rng),
        };
        let body = Body::new(vec2(&bc.x, "body x")?, bc.velocity()?, bc.radius, bc.m)?;
        bodies.push(body.with_color(color));
    }

    if let (Some(beads), Some(wire)) = (&cfg.beads, &wire) {
        let mut r = beads.first_radius;
        let mut angle: f64 = 0.0;
        for _ in 0..beads.count {
            let bead = Body::new(wire.point_at(angle), NVec2::zeros(), r, PI * r * r)?;
            bodies.push(bead.with_color(beads.color.unwrap_or([255, 0, 0])));
            angle += PI / beads.count as f64;
            r = rng.gen_range(beads.radius_min..=beads.radius_max);
        }
    }

    if let (Some(pit), Some(bounds)) = (&cfg.random_bodies, &bounds) {
        for _ in 0..pit.count {
            let r = rng.gen_range(pit.radius_min..=pit.radius_max);
            // balls wider than the box are placed at its middle
            let x = sample_between(rng, r, bounds.width - r);
            let y = sample_between(rng, r, bounds.height - r);
            let v = NVec2::new(
                sample_between(rng, -pit.speed_max, pit.speed_max),
                sample_between(rng, -pit.speed_max, pit.speed_max),
            );
            let ball = Body::new(NVec2::new(x, y), v, r, PI * r * r)?;
            let color = match pit.color {
                Some(c) => c,
                None => random_color(rng),
            };
            bodies.push(ball.with_color(color));
        }
    }

    Ok(World {
        bodies,
        segments,
        wire,
        bounds,
        t: 0.0,
    })
}

fn sample_between<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        0.5 * (lo + hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::presets;

    #[test]
    fn wire_preset_places_beads_on_the_wire() {
        let s = Scenario::build_scenario(presets::wire_beads()).unwrap();
        let wire = s.world.wire.unwrap();
        assert_eq!(s.world.bodies.len(), 5);
        for b in &s.world.bodies {
            assert!(((b.x - wire.center).norm() - wire.radius).abs() < 1e-12);
            assert!((b.m - PI * b.radius * b.radius).abs() < 1e-12);
        }
        assert_eq!(s.world.bodies[0].radius, 0.1);
    }

    #[test]
    fn wire_ticks_report_checks_and_contacts() {
        let mut s = Scenario::build_scenario(presets::wire_beads()).unwrap();
        // put bead 1 right next to bead 0 so they overlap
        let wire = s.world.wire.unwrap();
        s.world.bodies[1] = Body::new(wire.point_at(0.05), NVec2::zeros(), 0.1, PI * 0.01).unwrap();

        let stats = s.step();
        assert_eq!(stats.checks, 100 * (5 * 4 / 2));
        assert!(stats.collisions > 0);
        assert_eq!(s.last_stats(), stats);
    }

    #[test]
    fn same_seed_builds_same_ball_pit() {
        let a = Scenario::build_scenario(presets::ball_pit(50)).unwrap();
        let b = Scenario::build_scenario(presets::ball_pit(50)).unwrap();
        assert_eq!(a.world.bodies, b.world.bodies);
    }

    #[test]
    fn reset_resamples_but_keeps_count() {
        let mut s = Scenario::build_scenario(presets::ball_pit(30)).unwrap();
        for _ in 0..10 {
            s.step();
        }
        let before = s.world.bodies.clone();
        s.apply_event(InputEvent::Reset).unwrap();
        assert_eq!(s.world.bodies.len(), 30);
        assert_ne!(s.world.bodies, before);
        assert_eq!(s.world.t, 0.0);
    }

    #[test]
    fn toggle_switches_broad_phase() {
        let mut s = Scenario::build_scenario(presets::ball_pit(10)).unwrap();
        assert_eq!(s.broad_phase_name(), "sweep_and_prune");
        s.apply_event(InputEvent::ToggleBroadPhase).unwrap();
        assert_eq!(s.broad_phase_name(), "brute_force");
    }

    #[test]
    fn house_balls_stay_inside_bounds() {
        let mut s = Scenario::build_scenario(presets::house()).unwrap();
        let bounds = s.world.bounds.unwrap();
        for _ in 0..600 {
            s.step();
        }
        for b in &s.world.bodies {
            assert!(b.x.x >= -1.0 && b.x.x <= bounds.width + 1.0);
            assert!(b.x.y >= -1.0 && b.x.y <= bounds.height + 1.0);
            assert!(b.x.x.is_finite() && b.v.y.is_finite());
        }
        assert!((s.world.t - 10.0).abs() < 1e-9);
    }
}
