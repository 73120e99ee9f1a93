//! Parameter sweeps over trap drive settings
//!
//! This module provides functionality to:
//! - Describe a sweep (trap, particle, start state, swept parameter) in TOML
//! - Run one independent trap per swept value, optionally in parallel
//! - Report confinement or loss time per value
//! - Export a per-trial summary for analysis

pub mod config;
pub mod export;
pub mod runner;

pub use config::{InitialState, ParticleSpec, SweepConfig, SweepParameter};
pub use export::export_summary_csv;
pub use runner::{SweepRunner, TrialResult};
