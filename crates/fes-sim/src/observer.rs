//! Simulation observer trait for progress reporting and data collection.

use fes_core::VirtualTime;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] around each step.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64, steps: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, now: VirtualTime, dispatched: usize) {
///         self.steps += 1;
///         if self.steps % self.interval == 0 {
///             println!("t={now}: dispatched {dispatched} events");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once the clock has advanced to `now`, before any dispatch.
    ///
    /// `batch` is the number of events due at `now`.
    fn on_step_start(&mut self, _now: VirtualTime, _batch: usize) {}

    /// Called after every event of the step was handled.
    fn on_step_end(&mut self, _now: VirtualTime, _dispatched: usize) {}

    /// Called once when [`Sim::run`][crate::Sim::run] stops.
    fn on_sim_end(&mut self, _now: VirtualTime, _steps: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
