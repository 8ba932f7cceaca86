//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - time step, and the sub-step count of the constrained integrator,
//! - gravity and quadratic air resistance,
//! - bounciness for wall/segment contacts and restitution for body pairs,
//! - kick magnitudes applied by input events and the random seed

use super::vector::NVec2;
use crate::error::{SimError, SimResult};

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64,             // outer time step
    pub substeps: u32,       // sub-steps per tick (wire scenes)
    pub gravity: NVec2,
    pub air_resistance: f64, // quadratic drag coefficient
    pub bounciness: f64,     // speed kept after hitting a wall or segment
    pub restitution: f64,    // body-body restitution, in [0, 1]
    pub kick_force: f64,
    pub kick_force_min: f64,
    pub kick_force_max: f64,
    pub flash_time: f64,     // highlight length after a ball-pit collision
    pub seed: u64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            substeps: 1,
            gravity: NVec2::new(0.0, -9.8),
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

impl Parameters {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::parameter("dt", format!("must be positive, got {}", self.dt)));
        }
        if self.substeps == 0 {
            return Err(SimError::parameter("substeps", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::parameter(
                "restitution",
                format!("must lie in [0, 1], got {}", self.restitution),
            ));
        }
        if !(self.air_resistance >= 0.0) {
            return Err(SimError::parameter(
                "air_resistance",
                format!("must be non-negative, got {}", self.air_resistance),
            ));
        }
        if !(self.bounciness >= 0.0) {
            return Err(SimError::parameter(
                "bounciness",
                format!("must be non-negative, got {}", self.bounciness),
            ));
        }
        let finite = [
            ("gravity", self.gravity.x.is_finite() && self.gravity.y.is_finite()),
            ("air_resistance", self.air_resistance.is_finite()),
            ("bounciness", self.bounciness.is_finite()),
            ("kick_force", self.kick_force.is_finite()),
            ("kick_force_min", self.kick_force_min.is_finite()),
            ("kick_force_max", self.kick_force_max.is_finite()),
            ("flash_time", self.flash_time.is_finite()),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, ok)| !ok) {
            return Err(SimError::parameter(*name, "must be finite"));
        }
        if !(self.kick_force_min <= self.kick_force_max) {
            return Err(SimError::parameter(
                "kick_force_min",
                "must not exceed kick_force_max",
            ));
        }
        Ok(())
    }

    /// Length of one constrained sub-step
    pub fn sub_dt(&self) -> f64 {
        self.dt / self.substeps as f64
    }
}
