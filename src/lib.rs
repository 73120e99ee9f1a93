pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod simulation;
pub mod species;
pub mod sweep;
pub mod trap;
pub mod units;

pub use config::TrapConfig;
pub use error::TrapError;
pub use simulation::{RecordPolicy, RunOutcome, TrajectorySample};
pub use species::{ChargedParticle, Species};
pub use trap::Trap;
