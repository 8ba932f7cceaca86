//! Fixed-step time integrators for the circle world
//!
//! - `rk4_step` / `rk4_integrator`: classical 4th-order Runge-Kutta for free
//!   bodies under an `AccelSet`
//! - `substep_integrator`: sub-stepped position-based integration for bodies
//!   constrained to the wire, with bead collisions every sub-step
//! - `drift_integrator`: constant-velocity motion (ball pit)

use super::collision::{resolve_all_pairs, PairResponse};
use super::constraint::keep_on_wire;
use super::forces::AccelSet;
use super::params::Parameters;
use super::states::World;
use super::vector::{NVec2, Planar};

/// One RK4 step of `(x, v)` over `dt` under the acceleration field `forces`.
/// Pure: the result only depends on the arguments
pub fn rk4_step(x: NVec2, v: NVec2, dt: f64, forces: &AccelSet) -> (NVec2, NVec2) {
    let half_dt = 0.5 * dt;

    // k1: start of the step
    let k1v = forces.accel(x, v);
    let k1x = v;

    // k2, k3: midpoint, each predicted from the previous sample
    let k2v = forces.accel(x + half_dt * k1x, v + half_dt * k1v);
    let k2x = v + half_dt * k1v;

    let k3v = forces.accel(x + half_dt * k2x, v + half_dt * k2v);
    let k3x = v + half_dt * k2v;

    // k4: end of the step
    let k4v = forces.accel(x + dt * k3x, v + dt * k3v);
    let k4x = v + dt * k3v;

    let sixth = dt / 6.0;
    let x_new = x + sixth * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
    let v_new = v + sixth * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    (x_new, v_new)
}

/// Advance every body by one RK4 step of `params.dt` and advance `world.t`
pub fn rk4_integrator(world: &mut World, forces: &AccelSet, params: &Parameters) {
    let dt = params.dt;
    for b in world.bodies.iter_mut() {
        let (x, v) = rk4_step(b.x, b.v, dt, forces);
        b.x = x;
        b.v = v;
    }
    world.t += dt;
}

/// Advance the constrained world by one tick of `params.dt`, split into
/// `params.substeps` sub-steps.
///
/// Each sub-step predicts with semi-implicit Euler, projects every body onto
/// the wire, then replaces the velocity by the position change over the
/// sub-step. The projection is the only thing that adds or removes energy.
/// Bead collisions are resolved last, once per sub-step.
///
/// Without a wire the projection is skipped and this is plain sub-stepped
/// Euler with collisions.
///
/// Returns the number of bead contacts resolved, summed over the sub-steps.
pub fn substep_integrator(world: &mut World, params: &Parameters) -> usize {
    if world.bodies.is_empty() {
        world.t += params.dt;
        return 0;
    }
    let sub_dt = params.sub_dt();
    let g = params.gravity;

    let mut contacts = 0;
    for _ in 0..params.substeps {
        // Predict: v += g dt, remember x, x += v dt
        for b in world.bodies.iter_mut() {
            b.v += sub_dt * g;
            b.x_prev = b.x;
            b.x += sub_dt * b.v;
        }

        if let Some(wire) = world.wire {
            for b in world.bodies.iter_mut() {
                keep_on_wire(b, &wire);
            }
        }

        // Velocity follows the corrected position
        for b in world.bodies.iter_mut() {
            b.v = (b.x - b.x_prev) / sub_dt;
        }

        contacts += resolve_all_pairs(&mut world.bodies, PairResponse::Bead, params.restitution);
    }
    world.t += params.dt;
    contacts
}

/// Move every body in a straight line for `params.dt`
pub fn drift_integrator(world: &mut World, params: &Parameters) {
    let dt = params.dt;
    for b in world.bodies.iter_mut() {
        b.x.add_scaled(&b.v, dt);
    }
    world.t += dt;
}
