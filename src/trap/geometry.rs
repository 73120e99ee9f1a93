//! Electrode geometry and the capacitance model derived from it.
//!
//! Electrodes are treated as long parallel cylinders of radius `r` placed on
//! the corners of a square of side `d`. The pairwise capacitance per unit
//! length of two such cylinders is
//!
//! ```text
//! c = π·ε0 / ln( d/(2r) + sqrt( (d/(2r))² − 1 ) )
//! ```
//!
//! The model uses this same value for adjacent and for diagonally opposite
//! pairs. That is a known simplification of the trap model and reference
//! trajectories depend on it, so both coefficients stay identical.

use std::f64::consts::PI;

use crate::error::TrapError;
use crate::units::EPSILON_0;

/// Pairwise capacitance coefficients, computed once per trap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capacitance {
    /// Capacitance between neighbouring electrodes
    pub c_next: f64,
    /// Capacitance between diagonally opposite electrodes
    pub c_diag: f64,
}

impl Capacitance {
    /// Derive both coefficients from spacing `d` and electrode radius `r`.
    ///
    /// Fails unless `d > 2r > 0`, where the logarithm argument is above one.
    pub fn from_geometry(d: f64, r: f64) -> Result<Self, TrapError> {
        if !(r > 0.0 && d > 2.0 * r && d.is_finite()) {
            return Err(TrapError::InvalidGeometry { spacing: d, radius: r });
        }
        let c = cylinder_pair(d, r);
        Ok(Self { c_next: c, c_diag: c })
    }
}

fn cylinder_pair(d: f64, r: f64) -> f64 {
    let ratio = d / (2.0 * r);
    PI * EPSILON_0 / (ratio + (ratio * ratio - 1.0).sqrt()).ln()
}
