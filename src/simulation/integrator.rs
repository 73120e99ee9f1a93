//! Fixed-step semi-implicit (symplectic) Euler integration of the trapped particle.
//!
//! Each step evaluates the acceleration at the current position and time,
//! updates the velocity with it, then moves the particle with the
//! just-updated velocity:
//!
//! ```text
//! a = (q/m) · E(x(t), t)
//! v(t+h) = v(t) + a·h
//! x(t+h) = x(t) + v(t+h)·h
//! ```
//!
//! The run stops as soon as the particle leaves the open square (r, d−r)²,
//! or once the accumulated time reaches the requested duration. Step size
//! is expected to be far below the RF period; nothing checks that.

use crate::error::TrapError;
use crate::trap::Trap;

use super::sample::{RecordPolicy, RunOutcome, TrajectorySample};

/// Cap on the up-front trajectory allocation; longer runs grow the buffer as they go.
pub const MAX_PREALLOCATED_SAMPLES: usize = 1 << 20;

impl Trap {
    /// Run the attached particle for `duration` seconds with step `step`,
    /// recording every step.
    pub fn run_simulation(&mut self, duration: f64, step: f64) -> Result<RunOutcome, TrapError> {
        self.run_simulation_with(duration, step, RecordPolicy::EveryStep)
    }

    /// Run with an explicit recording policy. The previous trajectory is
    /// discarded before the run starts.
    pub fn run_simulation_with(
        &mut self,
        duration: f64,
        step: f64,
        policy: RecordPolicy,
    ) -> Result<RunOutcome, TrapError> {
        if !(duration.is_finite() && step.is_finite() && duration > 0.0 && step > 0.0) {
            return Err(TrapError::InvalidRun { duration, step });
        }
        let ion = self.ion.ok_or(TrapError::NoParticle)?;

        let mut trajectory = std::mem::take(&mut self.trajectory);
        trajectory.clear();
        // Capacity hint only; saturates for tiny steps
        let steps = (duration / step).ceil().min(usize::MAX as f64) as usize;
        trajectory.reserve(policy.expected_samples(steps).min(MAX_PREALLOCATED_SAMPLES));

        let q_to_m = ion.particle.charge_to_mass();
        let mut time = 0.0;
        let mut pos = ion.position;
        let mut vel = ion.velocity;
        let mut step_index = 0usize;

        log::debug!(
            "run start: T={:e} s h={:e} s (~{} steps) x0=({:e}, {:e}) v0=({}, {})",
            duration,
            step,
            steps,
            pos.x,
            pos.y,
            vel.x,
            vel.y
        );

        let outcome = loop {
            let acc = self.acceleration_at(pos, time, q_to_m);
            vel += acc * step;
            pos += vel * step;

            let sample = TrajectorySample {
                time,
                position: pos,
                velocity: vel,
                acceleration: acc,
            };

            let finished = if !is_finite_state(&sample) {
                Some(RunOutcome::Diverged { time })
            } else if !self.is_confined(pos) {
                Some(RunOutcome::Lost { time })
            } else {
                time += step;
                (time >= duration).then_some(RunOutcome::Confined { last_time: sample.time })
            };

            if finished.is_some() || policy.records(step_index) {
                trajectory.push(sample);
            }
            if let Some(outcome) = finished {
                break outcome;
            }
            step_index += 1;
        };

        self.trajectory = trajectory;

        match outcome {
            RunOutcome::Diverged { time } => log::warn!(
                "run diverged at t={:e} s after {} steps (x=({:e}, {:e}))",
                time,
                step_index + 1,
                pos.x,
                pos.y
            ),
            _ => log::info!(
                "run {} at t={:e} s after {} steps, {} samples recorded",
                outcome.label(),
                outcome.last_time(),
                step_index + 1,
                self.trajectory.len()
            ),
        }
        Ok(outcome)
    }
}

fn is_finite_state(s: &TrajectorySample) -> bool {
    s.position.x.is_finite()
        && s.position.y.is_finite()
        && s.velocity.x.is_finite()
        && s.velocity.y.is_finite()
        && s.acceleration.x.is_finite()
        && s.acceleration.y.is_finite()
}
