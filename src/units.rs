//! Physical constants used by the trap model.
//!
//! Everything is SI:
//! - Length: metre (m)
//! - Time: second (s)
//! - Charge: coulomb (C)
//! - Mass: kilogram (kg)

use std::f64::consts::PI;

/// Vacuum permittivity ε0 in F/m.
pub const EPSILON_0: f64 = 8.854_187_82e-12;
/// Elementary charge in coulombs.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_62e-19;
/// Electron rest mass in kilograms.
pub const ELECTRON_MASS: f64 = 9.109_383_56e-31;
/// Mass of a singly ionised strontium-88 atom in kilograms.
pub const SR88_ION_MASS: f64 = 1.454_964_2e-25;

/// Normalisation of the line-charge field, 2π·ε0.
pub const LINE_CHARGE_NORM: f64 = 2.0 * PI * EPSILON_0;

/// Seconds to microseconds, used by the sweep report.
pub const SECONDS_TO_MICROS: f64 = 1.0e6;
