//! Independent partitions, optionally in parallel.
//!
//! A partition is a sub-model with its own [`Sim`][crate::Sim] and therefore
//! its own queue; partitions never exchange events.  With the `parallel`
//! Cargo feature they run on Rayon's thread pool, otherwise one after
//! another.  Results come back in input order either way.

use crate::workload::{HoldConfig, HoldReport, partition_seed, run_hold};
use crate::{SimConfig, SimResult};

/// Run `run(index, part)` for every partition.
///
/// `run` builds and drives its own sim inside the call, so nothing but the
/// inputs and outputs crosses threads.
pub fn run_partitions<P, R, F>(parts: Vec<P>, run: F) -> Vec<SimResult<R>>
where
    P: Send,
    R: Send,
    F: Fn(usize, P) -> SimResult<R> + Sync,
{
    tracing::debug!(partitions = parts.len(), parallel = cfg!(feature = "parallel"), "running partitions");

    #[cfg(not(feature = "parallel"))]
    {
        parts.into_iter().enumerate().map(|(i, p)| run(i, p)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        parts
            .into_par_iter()
            .enumerate()
            .map(|(i, p)| run(i, p))
            .collect()
    }
}

/// Run `count` hold models, each with a seed derived from `config.seed`.
pub fn hold_partitions(config: &SimConfig, hold: &HoldConfig, count: usize) -> Vec<SimResult<HoldReport>> {
    let parts: Vec<SimConfig> = (0..count)
        .map(|i| SimConfig { seed: partition_seed(config.seed, i), ..config.clone() })
        .collect();
    run_partitions(parts, |_, part| run_hold(part, hold))
}
