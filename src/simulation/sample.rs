// simulation/sample.rs
// Records produced by a run: trajectory samples, the run verdict and the recording policy.

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

/// One recorded integration step.
///
/// `time` is the time at the start of the step; `acceleration` is the value
/// that produced this step's velocity and position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time: f64,
    #[serde(with = "dvec2_serde")]
    pub position: DVec2,
    #[serde(with = "dvec2_serde")]
    pub velocity: DVec2,
    #[serde(with = "dvec2_serde")]
    pub acceleration: DVec2,
}

/// How a run terminated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Survived the full requested duration
    Confined { last_time: f64 },
    /// Left the confinement region at `time`
    Lost { time: f64 },
    /// Position, velocity or acceleration became non-finite at `time`
    Diverged { time: f64 },
}

impl RunOutcome {
    /// True only when the particle stayed confined for the whole run.
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Confined { .. })
    }

    /// Time stamp of the terminal sample.
    pub fn last_time(&self) -> f64 {
        match *self {
            RunOutcome::Confined { last_time } => last_time,
            RunOutcome::Lost { time } | RunOutcome::Diverged { time } => time,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Confined { .. } => "confined",
            RunOutcome::Lost { .. } => "lost",
            RunOutcome::Diverged { .. } => "diverged",
        }
    }
}

/// Which steps are stored in the trajectory. The terminal step is always stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordPolicy {
    #[default]
    EveryStep,
    /// Every n-th step counted from step 0 (n = 0 behaves like 1)
    Stride(usize),
    FinalOnly,
}

impl RecordPolicy {
    #[inline]
    pub fn records(&self, step_index: usize) -> bool {
        match *self {
            RecordPolicy::EveryStep => true,
            RecordPolicy::Stride(n) => step_index % n.max(1) == 0,
            RecordPolicy::FinalOnly => false,
        }
    }

    /// Upper bound on stored samples for a run of `steps` steps.
    pub fn expected_samples(&self, steps: usize) -> usize {
        match *self {
            RecordPolicy::EveryStep => steps,
            RecordPolicy::Stride(n) => (steps / n.max(1)).saturating_add(2),
            RecordPolicy::FinalOnly => 1,
        }
    }
}

/// Planar vectors are stored as `[x, y]` pairs.
mod dvec2_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use ultraviolet::DVec2;

    pub fn serialize<S: Serializer>(v: &DVec2, s: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y].serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DVec2, D::Error> {
        let [x, y] = <[f64; 2]>::deserialize(d)?;
        Ok(DVec2::new(x, y))
    }
}
