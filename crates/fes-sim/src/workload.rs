//! Hold-model workload.
//!
//! The classic benchmark for future-event sets: a fixed population of
//! pending events where every dispatched event schedules exactly one
//! successor after a random delay.  Queue size stays constant, so the cost
//! measured is one extract plus one insert at steady state.
//!
//! Delays are exponential with mean `mean_delay`, drawn from a `SmallRng`
//! seeded from the run seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use fes_core::{EventId, VirtualTime};

use crate::handler::{EventHandler, Scheduler};
use crate::{Sim, SimBuilder, SimConfig, SimError, SimResult};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive the seed of partition `index` from the run's global seed.
///
/// Spreads consecutive indices across the seed space, so partitions never
/// share RNG streams.
pub fn partition_seed(global_seed: u64, index: usize) -> u64 {
    global_seed ^ (index as u64).wrapping_add(1).wrapping_mul(MIXING_CONSTANT)
}

/// Hold-model shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoldConfig {
    /// Number of events kept pending.
    pub population: usize,
    /// Mean of the exponential inter-event delay.
    pub mean_delay: f64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self { population: 1_000, mean_delay: 1.0 }
    }
}

/// Outcome of one hold-model run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoldReport {
    pub strategy:   String,
    pub steps:      u64,
    pub dispatched: u64,
    pub final_time: VirtualTime,
    pub pending:    usize,
}

/// [`EventHandler`] that replaces every dispatched event with one successor.
pub struct HoldModel {
    rng:        SmallRng,
    mean_delay: f64,
}

impl HoldModel {
    pub fn new(seed: u64, mean_delay: f64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            mean_delay,
        }
    }

    /// Exponential delay by inversion.
    pub fn next_delay(&mut self) -> f64 {
        let u: f64 = self.rng.gen_range(0.0..1.0);
        -self.mean_delay * (1.0 - u).ln()
    }
}

impl EventHandler for HoldModel {
    fn handle(&mut self, _event: EventId, sched: &mut Scheduler<'_>) -> SimResult<()> {
        let delay = self.next_delay();
        sched.schedule_in(delay)?;
        Ok(())
    }
}

/// Build a hold-model sim from `config` and seed its initial population.
pub fn hold_sim(config: SimConfig, hold: &HoldConfig) -> SimResult<Sim<HoldModel>> {
    if !(hold.mean_delay.is_finite() && hold.mean_delay > 0.0) {
        return Err(SimError::Config(format!(
            "hold mean_delay must be positive and finite, got {}",
            hold.mean_delay
        )));
    }
    let mut model = HoldModel::new(config.seed, hold.mean_delay);
    let initial: Vec<f64> = (0..hold.population).map(|_| model.next_delay()).collect();

    let mut sim = SimBuilder::new(config, model).build()?;
    sim.queue_mut().set_size_hint(hold.population)?;
    for delay in initial {
        sim.schedule_at(VirtualTime::ZERO + delay)?;
    }
    Ok(sim)
}

/// Build, seed, and run a hold model; report the outcome.
pub fn run_hold(config: SimConfig, hold: &HoldConfig) -> SimResult<HoldReport> {
    let mut sim = hold_sim(config, hold)?;
    sim.run(&mut crate::NoopObserver)?;
    Ok(HoldReport {
        strategy:   sim.queue().name().to_owned(),
        steps:      sim.steps(),
        dispatched: sim.dispatched(),
        final_time: sim.now(),
        pending:    sim.queue().len(),
    })
}
