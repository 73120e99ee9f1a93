//! Sweep runner executing independent trap trials

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::SweepConfig;
use crate::error::TrapError;
use crate::simulation::{RecordPolicy, RunOutcome};
use crate::trap::Trap;
use crate::units::SECONDS_TO_MICROS;

/// Outcome of one trial of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Value of the swept parameter
    pub value: f64,
    pub outcome: RunOutcome,
    pub samples_recorded: usize,
}

impl TrialResult {
    /// Console line in the form `56 V: trapped till 9999.999 us.`
    pub fn report_line(&self, unit: &str) -> String {
        let micros = self.outcome.last_time() * SECONDS_TO_MICROS;
        match self.outcome {
            RunOutcome::Confined { .. } => format!("{} {}: trapped till {:.3} us.", self.value, unit, micros),
            RunOutcome::Lost { .. } => format!("{} {}: lost at {:.3} us.", self.value, unit, micros),
            RunOutcome::Diverged { .. } => format!("{} {}: diverged at {:.3} us.", self.value, unit, micros),
        }
    }
}

pub struct SweepRunner {
    config: SweepConfig,
}

impl SweepRunner {
    pub fn new(config: SweepConfig) -> Result<Self, TrapError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Build the trap for one swept value with the particle attached.
    pub fn build_trial(&self, value: f64) -> Result<Trap, TrapError> {
        let cfg = self.config.parameter.apply(&self.config.trap, value);
        let mut trap = Trap::new(cfg)?;
        let particle = self.config.particle.particle()?;
        let [x, y] = self.config.initial.absolute_position(trap.config());
        let [vx, vy] = self.config.initial.velocity;
        trap.add_ion(particle, x, y, vx, vy);
        Ok(trap)
    }

    /// Run one trial and hand back the trap so its trajectory can be exported.
    pub fn run_trial(&self, value: f64, policy: RecordPolicy) -> Result<(TrialResult, Trap), TrapError> {
        let mut trap = self.build_trial(value)?;
        let outcome = trap.run_simulation_with(self.config.duration, self.config.step, policy)?;
        let result = TrialResult {
            value,
            outcome,
            samples_recorded: trap.trajectory().len(),
        };
        Ok((result, trap))
    }

    fn run_value(&self, value: f64) -> Result<TrialResult, TrapError> {
        self.run_trial(value, self.config.record_policy()).map(|(result, _)| result)
    }

    /// Run every swept value. Results come back in sweep order.
    pub fn run_all(&self) -> Result<Vec<TrialResult>, TrapError> {
        let values = self.config.values()?;
        let start_time = std::time::Instant::now();
        log::info!(
            "sweep '{}': {} trials of {:?}, parallel={}",
            self.config.study_name,
            values.len(),
            self.config.parameter,
            self.config.parallel
        );

        let results = if self.config.parallel {
            values
                .par_iter()
                .map(|&v| self.run_value(v))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            values
                .iter()
                .map(|&v| self.run_value(v))
                .collect::<Result<Vec<_>, _>>()?
        };

        log::info!(
            "sweep '{}' finished in {:.2}s",
            self.config.study_name,
            start_time.elapsed().as_secs_f32()
        );
        Ok(results)
    }

    /// Print one line per trial.
    pub fn report(&self, results: &[TrialResult]) {
        let unit = self.config.parameter.unit();
        for r in results {
            println!("{}", r.report_line(unit));
        }
    }

    /// List all swept values without running them
    pub fn list_trials(&self) -> Result<(), TrapError> {
        let values = self.config.values()?;
        println!("\n╔══════════════════════════════════════════╗");
        println!("║  Sweep Study: {}  ", self.config.study_name);
        println!("╚══════════════════════════════════════════╝\n");
        println!("Particle: {}", self.config.particle.label());
        println!("Parameter: {:?} ({})", self.config.parameter, self.config.parameter.unit());
        println!("Duration: {:e} s, step {:e} s", self.config.duration, self.config.step);
        println!("Total trials: {}\n", values.len());
        for (idx, v) in values.iter().enumerate() {
            println!("  [{}] {} {}", idx + 1, v, self.config.parameter.unit());
        }
        Ok(())
    }
}
