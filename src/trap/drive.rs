//! RF + bias drive applied to the four electrodes.
//!
//! Electrodes are numbered clockwise starting at the origin corner. RF is
//! common-moded onto electrodes 1 and 3; each electrode also carries its own
//! static bias. The charge solver only needs the three successive
//! differences `V2−V1`, `V3−V2` and `V4−V3`.

use std::f64::consts::TAU;

use crate::config::TrapConfig;

/// Inter-electrode voltage differences at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoltageDifferences {
    /// Electrode 2 minus electrode 1
    pub v1: f64,
    /// Electrode 3 minus electrode 2
    pub v2: f64,
    /// Electrode 4 minus electrode 3
    pub v3: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElectrodeDrive {
    amplitude: f64,
    omega: f64,
    phase_rad: f64,
    bias: [f64; 4],
}

impl ElectrodeDrive {
    pub fn new(config: &TrapConfig) -> Self {
        Self {
            amplitude: config.rf_amplitude,
            omega: TAU * config.rf_frequency,
            phase_rad: config.rf_phase_deg / 360.0 * TAU,
            bias: config.bias,
        }
    }

    /// Angular frequency ω = 2πf (rad/s).
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Instantaneous RF voltage `v_rf · cos(ωt + φ)`.
    #[inline]
    pub fn rf_at(&self, t: f64) -> f64 {
        self.amplitude * (self.omega * t + self.phase_rad).cos()
    }

    #[inline]
    pub fn differences_at(&self, t: f64) -> VoltageDifferences {
        let rf = self.rf_at(t);
        let [b1, b2, b3, b4] = self.bias;
        VoltageDifferences {
            v1: b2 - (rf + b1),
            v2: (b3 + rf) - b2,
            v3: b4 - (rf + b3),
        }
    }
}
