use log::info;

use super::{Frame, Renderer};
use crate::error::SimResult;
use crate::simulation::input::InputSource;
use crate::simulation::scenario::Scenario;

/// Logs a one-line summary every `every` frames instead of drawing
pub struct LogRenderer {
    pub every: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if frame.tick % self.every != 0 {
            return;
        }
        let energy: f64 = frame.bodies.iter().map(|b| b.kinetic_energy()).sum();
        info!(
            "tick {:6} t={:8.3} | {} bodies | KE {:.4} | {} checks, {} collisions ({})",
            frame.tick,
            frame.t,
            frame.bodies.len(),
            energy,
            frame.stats.checks,
            frame.stats.collisions,
            frame.broad_phase
        );
    }
}

/// Totals over a headless run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub events: usize,
    pub checks: usize,
    pub collisions: usize,
}

/// Drive `scenario` for `ticks` ticks: poll input, apply its events, step,
/// then hand the frame to the renderer
pub fn run_headless<I, R>(scenario: &mut Scenario, input: &mut I, renderer: &mut R, ticks: u64) -> SimResult<RunSummary>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    info!("run_headless: {} ticks with {} bodies", ticks, scenario.world.bodies.len());

    let mut summary = RunSummary::default();
    for _ in 0..ticks {
        for event in input.poll(scenario.tick()) {
            scenario.apply_event(event)?;
            summary.events += 1;
        }

        let stats = scenario.step();
        summary.ticks += 1;
        summary.checks += stats.checks;
        summary.collisions += stats.collisions;

        renderer.draw(&Frame::of(scenario));
    }
    Ok(summary)
}
