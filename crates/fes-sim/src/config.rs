//! Driver configuration.

use fes_core::{QueueConfig, VirtualTime};

use crate::{SimError, SimResult};

/// Global configuration for one [`Sim`][crate::Sim] run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Events scheduled after this time are left in the queue.  `None` runs
    /// until the queue has nothing reachable.
    pub end_time: Option<VirtualTime>,

    /// Stop after this many steps (one step = one timestamp).
    pub max_steps: Option<u64>,

    /// Global RNG seed for workloads.  Same seed → identical run.
    pub seed: u64,

    /// Event-queue selection and parameters.
    pub queue: QueueConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            end_time:  None,
            max_steps: None,
            seed:      0,
            queue:     QueueConfig::default(),
        }
    }
}

impl SimConfig {
    /// Check the driver fields.  Queue parameters are checked when the queue
    /// is built.
    pub fn validate(&self) -> SimResult<()> {
        if let Some(end) = self.end_time {
            if !end.is_finite() || end < VirtualTime::ZERO {
                return Err(SimError::Config(format!(
                    "end_time must be a finite non-negative time, got {end}"
                )));
            }
        }
        Ok(())
    }

    /// Whether a step at `time` lies past `end_time`.
    #[inline]
    pub fn is_past_end(&self, time: VirtualTime) -> bool {
        self.end_time.is_some_and(|end| time > end)
    }
}
