//! Sweep configuration structures
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{self, TrapConfig};
use crate::error::TrapError;
use crate::simulation::RecordPolicy;
use crate::species::{ChargedParticle, Species};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Name of the sweep study
    pub study_name: String,

    /// Simulated time per trial (s)
    pub duration: f64,

    /// Integration step (s)
    pub step: f64,

    /// Which trap parameter is swept
    pub parameter: SweepParameter,

    /// First swept value
    pub start: f64,

    /// Sweep stops before reaching this value
    pub stop: f64,

    pub increment: f64,

    /// Record every N-th step of each trial; 0 keeps only the terminal sample
    #[serde(default = "default_record_stride")]
    pub record_stride: usize,

    /// Run trials on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Trap used for every trial; the swept parameter overrides one field
    pub trap: TrapConfig,

    /// Particle placed in the trap
    pub particle: ParticleSpec,

    /// Initial position and velocity
    pub initial: InitialState,
}

fn default_record_stride() -> usize {
    config::DEFAULT_SWEEP_RECORD_STRIDE
}

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ParticleSpec {
    Preset { species: Species },
    Custom { mass: f64, charge: f64 },
}

impl ParticleSpec {
    pub fn particle(&self) -> Result<ChargedParticle, TrapError> {
        match *self {
            ParticleSpec::Preset { species } => Ok(species.particle()),
            ParticleSpec::Custom { mass, charge } => ChargedParticle::new(mass, charge),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ParticleSpec::Preset { species } => species.name().to_string(),
            ParticleSpec::Custom { mass, charge } => format!("m={:e} kg q={:e} C", mass, charge),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    /// Start position (m)
    pub position: [f64; 2],

    /// Interpret `position` as an offset from the trap centre
    #[serde(default = "default_relative")]
    pub relative_to_center: bool,

    /// Start velocity (m/s)
    pub velocity: [f64; 2],
}

fn default_relative() -> bool {
    true
}

impl InitialState {
    /// Absolute start position inside `trap`.
    pub fn absolute_position(&self, trap: &TrapConfig) -> [f64; 2] {
        if self.relative_to_center {
            let c = trap.center();
            [c + self.position[0], c + self.position[1]]
        } else {
            self.position
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepParameter {
    /// RF amplitude (V)
    RfAmplitude,
    /// RF frequency (Hz)
    RfFrequency,
    /// RF phase (degrees)
    RfPhase,
}

impl SweepParameter {
    pub fn unit(&self) -> &'static str {
        match self {
            SweepParameter::RfAmplitude => "V",
            SweepParameter::RfFrequency => "Hz",
            SweepParameter::RfPhase => "deg",
        }
    }

    /// Copy of `base` with this parameter set to `value`.
    pub fn apply(&self, base: &TrapConfig, value: f64) -> TrapConfig {
        let mut cfg = base.clone();
        match self {
            SweepParameter::RfAmplitude => cfg.rf_amplitude = value,
            SweepParameter::RfFrequency => cfg.rf_frequency = value,
            SweepParameter::RfPhase => cfg.rf_phase_deg = value,
        }
        cfg
    }
}

impl Default for SweepConfig {
    /// RF amplitude scan of a Sr-88 ion over 1..100 V in 1 V steps.
    fn default() -> Self {
        let offset = config::DEFAULT_START_OFFSET;
        SweepConfig {
            study_name: "RF Amplitude Scan".to_string(),
            trap: TrapConfig::default(),
            particle: ParticleSpec::Preset { species: Species::Sr88Ion },
            initial: InitialState {
                position: [offset, offset],
                relative_to_center: true,
                velocity: config::DEFAULT_START_VELOCITY,
            },
            duration: config::DEFAULT_DURATION,
            step: config::DEFAULT_STEP,
            parameter: SweepParameter::RfAmplitude,
            start: config::DEFAULT_SWEEP_START,
            stop: config::DEFAULT_SWEEP_STOP,
            increment: config::DEFAULT_SWEEP_INCREMENT,
            record_stride: config::DEFAULT_SWEEP_RECORD_STRIDE,
            parallel: true,
        }
    }
}

impl SweepConfig {
    /// Swept values, accumulated from `start` by `increment` while below `stop`.
    pub fn values(&self) -> Result<Vec<f64>, TrapError> {
        if !(self.start.is_finite() && self.stop.is_finite() && self.increment.is_finite()) {
            return Err(TrapError::InvalidSweep("range bounds must be finite".to_string()));
        }
        if self.increment <= 0.0 {
            return Err(TrapError::InvalidSweep(format!(
                "increment {} must be positive",
                self.increment
            )));
        }
        let estimate = ((self.stop - self.start) / self.increment).ceil();
        if estimate > config::MAX_SWEEP_TRIALS as f64 {
            return Err(TrapError::InvalidSweep(format!(
                "range [{}, {}) by {} gives ~{:e} trials, limit is {}",
                self.start,
                self.stop,
                self.increment,
                estimate,
                config::MAX_SWEEP_TRIALS
            )));
        }
        let mut values = Vec::new();
        let mut v = self.start;
        while v < self.stop {
            values.push(v);
            let next = v + self.increment;
            // increment below one ulp of v would never reach stop
            if next == v || values.len() > config::MAX_SWEEP_TRIALS {
                return Err(TrapError::InvalidSweep(format!(
                    "increment {} does not advance past {}",
                    self.increment, v
                )));
            }
            v = next;
        }
        Ok(values)
    }

    pub fn record_policy(&self) -> RecordPolicy {
        match self.record_stride {
            0 => RecordPolicy::FinalOnly,
            n => RecordPolicy::Stride(n),
        }
    }

    /// Check everything a trial needs before any trial runs.
    pub fn validate(&self) -> Result<(), TrapError> {
        let values = self.values()?;
        if values.is_empty() {
            return Err(TrapError::InvalidSweep(format!(
                "empty range [{}, {})",
                self.start, self.stop
            )));
        }
        self.particle.particle()?;
        if !(self.duration.is_finite() && self.step.is_finite() && self.duration > 0.0 && self.step > 0.0) {
            return Err(TrapError::InvalidRun {
                duration: self.duration,
                step: self.step,
            });
        }
        for v in [values[0], values[values.len() - 1]] {
            self.parameter.apply(&self.trap, v).validate()?;
        }
        Ok(())
    }

    /// Load sweep configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrapError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save sweep configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TrapError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
