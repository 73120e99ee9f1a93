// simulation/mod.rs
// Re-exports and module declarations for simulation submodules

pub mod integrator;
pub mod sample;

pub use integrator::MAX_PREALLOCATED_SAMPLES;
pub use sample::*;
