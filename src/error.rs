// error.rs
// Error taxonomy shared by the trap core, the sweep driver and trajectory export.

use std::fmt;

/// Errors reported by trap construction, simulation runs and the drivers built on them.
///
/// Confinement loss is not an error: it is a normal outcome of a run and is
/// reported through [`crate::simulation::RunOutcome`].
#[derive(Debug)]
pub enum TrapError {
    /// Electrode geometry cannot produce a finite capacitance (needs d > 2r > 0)
    InvalidGeometry { spacing: f64, radius: f64 },
    /// Particle mass must be positive and both mass and charge finite
    InvalidParticle { mass: f64, charge: f64 },
    /// Drive parameters must be finite and the frequency non-negative
    InvalidDrive(String),
    /// Run duration and step size must both be positive and finite
    InvalidRun { duration: f64, step: f64 },
    /// A run was requested before any particle was attached
    NoParticle,
    /// Sweep configuration is unusable
    InvalidSweep(String),
    /// Underlying file system failure
    Io(std::io::Error),
    /// TOML configuration could not be read or written
    Config(String),
    /// Trajectory (de)serialisation failed
    Export(String),
}

impl fmt::Display for TrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { spacing, radius } => write!(
                f,
                "invalid electrode geometry: spacing {:e} m must exceed twice the radius {:e} m (and radius must be positive)",
                spacing, radius
            ),
            Self::InvalidParticle { mass, charge } => {
                write!(f, "invalid particle: mass {:e} kg, charge {:e} C", mass, charge)
            }
            Self::InvalidDrive(msg) => write!(f, "invalid drive configuration: {}", msg),
            Self::InvalidRun { duration, step } => write!(
                f,
                "invalid run parameters: duration {:e} s and step {:e} s must be positive",
                duration, step
            ),
            Self::NoParticle => write!(f, "no particle attached to the trap"),
            Self::InvalidSweep(msg) => write!(f, "invalid sweep: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Export(msg) => write!(f, "trajectory export error: {}", msg),
        }
    }
}

impl std::error::Error for TrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrapError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for TrapError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for TrapError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<serde_json::Error> for TrapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Export(e.to_string())
    }
}

impl From<bincode::Error> for TrapError {
    fn from(e: bincode::Error) -> Self {
        Self::Export(e.to_string())
    }
}
