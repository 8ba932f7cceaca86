//! High-level runtime engine settings
//!
//! Selects which scene kind a `Scenario` steps, and which broad phase the ball
//! pit starts with

use crate::configuration::config::{BroadPhaseConfig, EngineConfig, KindConfig};
use crate::simulation::broad_phase::BroadPhaseKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationKind {
    FreeFlight, // RK4 balls, segments and bounds
    Wire,       // beads on a circular wire, sub-stepped
    BallPit,    // drifting balls in a box, broad phase + impulses
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub kind: SimulationKind,
    pub broad_phase: BroadPhaseKind,
    pub vertical_filter: bool, // sweep-and-prune early-out on |dy|
}

impl From<&EngineConfig> for Engine {
    fn from(cfg: &EngineConfig) -> Self {
        let kind = match cfg.kind {
            KindConfig::FreeFlight => SimulationKind::FreeFlight,
            KindConfig::Wire => SimulationKind::Wire,
            KindConfig::BallPit => SimulationKind::BallPit,
        };
        let broad_phase = match cfg.broad_phase {
            BroadPhaseConfig::BruteForce => BroadPhaseKind::BruteForce,
            BroadPhaseConfig::SweepAndPrune => BroadPhaseKind::SweepAndPrune,
        };
        Self {
            kind,
            broad_phase,
            vertical_filter: cfg.vertical_filter,
        }
    }
}
