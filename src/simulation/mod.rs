pub mod vector;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod constraint;
pub mod collision;
pub mod broad_phase;
pub mod input;
pub mod scenario;
