// Centralized configuration for trap geometry, drive and run parameters

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TrapError;

// ====================
// Reference Trap Geometry
// ====================
/// Electrode spacing d (m): side of the square whose corners hold the electrodes.
pub const DEFAULT_SPACING: f64 = 7.778e-3;
/// Electrode radius r (m).
pub const DEFAULT_ELECTRODE_RADIUS: f64 = 2.5e-3;

// ====================
// Reference Drive
// ====================
pub const DEFAULT_RF_AMPLITUDE: f64 = 56.0; // V
pub const DEFAULT_RF_FREQUENCY: f64 = 1.0e6; // Hz
pub const DEFAULT_RF_PHASE_DEG: f64 = 0.0;
/// Static offsets on electrodes 1..4 (V), numbered clockwise from the origin corner.
pub const DEFAULT_BIAS: [f64; 4] = [0.0, -0.3, 0.0, -0.3];

// ====================
// Reference Run
// ====================
pub const DEFAULT_DURATION: f64 = 1.0e-2; // s
pub const DEFAULT_STEP: f64 = 1.0e-9; // s
/// Initial displacement of the ion from the trap centre on both axes (m).
pub const DEFAULT_START_OFFSET: f64 = 0.7e-3;
/// Initial ion velocity (m/s).
pub const DEFAULT_START_VELOCITY: [f64; 2] = [700.0, 0.0];

// ====================
// Reference Sweep
// ====================
pub const DEFAULT_SWEEP_START: f64 = 1.0;
pub const DEFAULT_SWEEP_STOP: f64 = 100.0; // exclusive
pub const DEFAULT_SWEEP_INCREMENT: f64 = 1.0;
/// Upper bound on the number of trials a single sweep may generate
pub const MAX_SWEEP_TRIALS: usize = 100_000;
/// Sweep trials only need the terminal sample; record every N-th step otherwise.
pub const DEFAULT_SWEEP_RECORD_STRIDE: usize = 1000;

/// Fixed description of one trap instance.
///
/// Phase is given in degrees and defaults to zero when absent from a file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrapConfig {
    /// Electrode spacing d (m)
    pub spacing: f64,
    /// Electrode radius r (m)
    pub electrode_radius: f64,
    /// RF amplitude (V), applied common-mode on electrodes 1 and 3
    pub rf_amplitude: f64,
    /// RF frequency (Hz)
    pub rf_frequency: f64,
    #[serde(default)]
    pub rf_phase_deg: f64,
    /// Bias voltages on electrodes 1..4 (V)
    pub bias: [f64; 4],
}

impl Default for TrapConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            electrode_radius: DEFAULT_ELECTRODE_RADIUS,
            rf_amplitude: DEFAULT_RF_AMPLITUDE,
            rf_frequency: DEFAULT_RF_FREQUENCY,
            rf_phase_deg: DEFAULT_RF_PHASE_DEG,
            bias: DEFAULT_BIAS,
        }
    }
}

impl TrapConfig {
    /// Build a configuration with zero RF phase.
    pub fn new(
        spacing: f64,
        electrode_radius: f64,
        rf_amplitude: f64,
        bias: [f64; 4],
        rf_frequency: f64,
    ) -> Self {
        Self {
            spacing,
            electrode_radius,
            rf_amplitude,
            rf_frequency,
            rf_phase_deg: 0.0,
            bias,
        }
    }

    pub fn with_phase_deg(mut self, phase_deg: f64) -> Self {
        self.rf_phase_deg = phase_deg;
        self
    }

    /// Trap centre coordinate on both axes.
    pub fn center(&self) -> f64 {
        self.spacing / 2.0
    }

    /// Reject configurations the field model cannot represent.
    pub fn validate(&self) -> Result<(), TrapError> {
        let d = self.spacing;
        let r = self.electrode_radius;
        if !d.is_finite() || !r.is_finite() || r <= 0.0 || d <= 2.0 * r {
            return Err(TrapError::InvalidGeometry { spacing: d, radius: r });
        }
        if !self.rf_amplitude.is_finite() || !self.rf_phase_deg.is_finite() {
            return Err(TrapError::InvalidDrive(format!(
                "amplitude {} V and phase {} deg must be finite",
                self.rf_amplitude, self.rf_phase_deg
            )));
        }
        if !self.rf_frequency.is_finite() || self.rf_frequency < 0.0 {
            return Err(TrapError::InvalidDrive(format!(
                "frequency {} Hz must be finite and non-negative",
                self.rf_frequency
            )));
        }
        if let Some(v) = self.bias.iter().find(|v| !v.is_finite()) {
            return Err(TrapError::InvalidDrive(format!("bias {} V must be finite", v)));
        }
        Ok(())
    }

    /// Load a trap configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrapError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save the trap configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TrapError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_geometry() {
        let cfg = TrapConfig::default();
        assert_eq!(cfg.spacing, 7.778e-3);
        assert_eq!(cfg.electrode_radius, 2.5e-3);
        assert_eq!(cfg.bias, [0.0, -0.3, 0.0, -0.3]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn touching_electrodes_are_rejected() {
        let cfg = TrapConfig::new(1e-3, 1e-3, 10.0, [0.0; 4], 1e6);
        assert!(matches!(cfg.validate(), Err(TrapError::InvalidGeometry { .. })));
        // d == 2r puts the logarithm at zero
        let cfg = TrapConfig::new(2e-3, 1e-3, 10.0, [0.0; 4], 1e6);
        assert!(matches!(cfg.validate(), Err(TrapError::InvalidGeometry { .. })));
    }

    #[test]
    fn negative_frequency_is_rejected() {
        let cfg = TrapConfig::new(7e-3, 1e-3, 10.0, [0.0; 4], -1.0);
        assert!(matches!(cfg.validate(), Err(TrapError::InvalidDrive(_))));
    }

    #[test]
    fn phase_defaults_to_zero_when_missing() {
        let text = r#"
            spacing = 0.007778
            electrode_radius = 0.0025
            rf_amplitude = 56.0
            rf_frequency = 1000000.0
            bias = [0.0, -0.3, 0.0, -0.3]
        "#;
        let cfg: TrapConfig = toml::from_str(text).unwrap();
        assert_eq!(cfg.rf_phase_deg, 0.0);
        assert_eq!(cfg, TrapConfig::default());
    }

    #[test]
    fn toml_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("ion_trap_cfg_{}.toml", std::process::id()));
        let cfg = TrapConfig::default().with_phase_deg(45.0);
        cfg.to_file(&path).unwrap();
        let loaded = TrapConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }
}
