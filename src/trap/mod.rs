// trap/mod.rs
// The planar four-electrode trap: fixed geometry and drive plus the single particle it holds.

pub mod charge;
pub mod drive;
pub mod field;
pub mod geometry;

#[cfg(test)]
mod tests;

pub use charge::{solve_charges, ElectrodeCharges};
pub use drive::{ElectrodeDrive, VoltageDifferences};
pub use field::field_at;
pub use geometry::Capacitance;

use ultraviolet::DVec2;

use crate::config::TrapConfig;
use crate::error::TrapError;
use crate::simulation::TrajectorySample;
use crate::species::ChargedParticle;

/// Particle attached to a trap together with its starting state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrappedParticle {
    pub particle: ChargedParticle,
    pub position: DVec2,
    pub velocity: DVec2,
}

/// One trap instance.
///
/// Configuration and the derived drive/capacitance values are fixed at
/// construction. Only the attached particle and the trajectory of the most
/// recent run change afterwards.
pub struct Trap {
    config: TrapConfig,
    capacitance: Capacitance,
    drive: ElectrodeDrive,
    pub(crate) ion: Option<TrappedParticle>,
    pub(crate) trajectory: Vec<TrajectorySample>,
}

impl Trap {
    pub fn new(config: TrapConfig) -> Result<Self, TrapError> {
        config.validate()?;
        let capacitance = Capacitance::from_geometry(config.spacing, config.electrode_radius)?;
        let drive = ElectrodeDrive::new(&config);
        log::debug!(
            "trap d={:e} m r={:e} m v_rf={} V f={:e} Hz phase={} deg c={:e} F/m",
            config.spacing,
            config.electrode_radius,
            config.rf_amplitude,
            config.rf_frequency,
            config.rf_phase_deg,
            capacitance.c_next
        );
        Ok(Self {
            config,
            capacitance,
            drive,
            ion: None,
            trajectory: Vec::new(),
        })
    }

    /// Attach the particle and its initial state, replacing any previous one.
    pub fn add_ion(&mut self, particle: ChargedParticle, x: f64, y: f64, vx: f64, vy: f64) {
        self.ion = Some(TrappedParticle {
            particle,
            position: DVec2::new(x, y),
            velocity: DVec2::new(vx, vy),
        });
    }

    pub fn ion(&self) -> Option<&TrappedParticle> {
        self.ion.as_ref()
    }

    pub fn config(&self) -> &TrapConfig {
        &self.config
    }

    pub fn capacitance(&self) -> Capacitance {
        self.capacitance
    }

    pub fn drive(&self) -> &ElectrodeDrive {
        &self.drive
    }

    /// Samples of the most recent run; empty before the first run.
    pub fn trajectory(&self) -> &[TrajectorySample] {
        &self.trajectory
    }

    /// Electrode charges at time `t`, recomputed from scratch.
    pub fn charges_at(&self, t: f64) -> ElectrodeCharges {
        solve_charges(self.drive.differences_at(t), &self.capacitance)
    }

    pub fn e_field_at(&self, pos: DVec2, t: f64) -> DVec2 {
        field_at(pos, &self.charges_at(t), self.config.spacing)
    }

    /// Acceleration of a particle with ratio `q_to_m` (C/kg) at `pos` and time `t`.
    #[inline]
    pub fn acceleration_at(&self, pos: DVec2, t: f64, q_to_m: f64) -> DVec2 {
        self.e_field_at(pos, t) * q_to_m
    }

    /// Strictly inside the open interval (r, d−r) on both axes.
    #[inline]
    pub fn is_confined(&self, pos: DVec2) -> bool {
        let lo = self.config.electrode_radius;
        let hi = self.config.spacing - self.config.electrode_radius;
        pos.x > lo && pos.x < hi && pos.y > lo && pos.y < hi
    }
}
