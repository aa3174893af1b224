//! `fes-sim` — reference discrete-event driver over the `fes` event queues.
//!
//! # Step loop
//!
//! ```text
//! loop:
//!   ① Peek      : t = queue.get_min(); stop if None or t > end_time.
//!   ② Advance   : now = t.
//!   ③ Extract   : batch = queue.dequeue_all().
//!   ④ Dispatch  : handler.handle(event, scheduler) for each event in batch;
//!                 follow-ups at times < now are refused (Causality).
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs independent partitions on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the queues' per-event indices.                  |
//! | `serde`    | Serde derives on `SimConfig`, `HoldConfig`, `HoldReport`.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fes_sim::{HoldConfig, NoopObserver, SimConfig, hold_sim};
//!
//! let mut sim = hold_sim(SimConfig { max_steps: Some(10_000), ..Default::default() },
//!                        &HoldConfig::default())?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod observer;
pub mod partition;
pub mod sim;
pub mod workload;


pub use builder::{BoxListener, SimBuilder};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use handler::{EventHandler, Scheduler};
pub use observer::{NoopObserver, SimObserver};
pub use partition::{hold_partitions, run_partitions};
pub use sim::Sim;
pub use workload::{HoldConfig, HoldModel, HoldReport, hold_sim, partition_seed, run_hold};
