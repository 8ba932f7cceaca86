pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::vector::{NVec2, Planar};
pub use simulation::states::{Body, Bounds, CandidatePair, Circle, Collidable, Segment, Wire, World};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, Gravity, QuadraticDrag};
pub use simulation::integrator::{drift_integrator, rk4_integrator, rk4_step, substep_integrator};
pub use simulation::constraint::keep_on_wire;
pub use simulation::collision::{resolve_bead_pair, resolve_combinations, resolve_impulse_pair, PairResponse};
pub use simulation::broad_phase::{BroadPhase, BroadPhaseKind, BruteForce, DetectionStats, Detector, SweepAndPrune};
pub use simulation::input::{InputEvent, InputSource, NoInput, ScriptedInput};
pub use simulation::scenario::{Scenario, TickStats};

pub use configuration::config::ScenarioConfig;
pub use configuration::presets::preset;

pub use visualization::{Frame, Renderer, Viewport};
pub use visualization::headless::{run_headless, LogRenderer, RunSummary};

pub use benchmark::benchmark::{bench_detection, report_csv, BenchmarkConfig, BenchmarkRow};
