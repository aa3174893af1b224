//! `fes-core` — foundational types for the `fes` future-event-set framework.
//!
//! This crate is a dependency of every other `fes-*` crate.  It intentionally
//! has no `fes-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`time`]    | `SimTime` trait, `VirtualTime` (total-ordered `f64`)       |
//! | [`ids`]     | `EventId`, `EventIdGen`, the `EventRef` bound              |
//! | [`entry`]   | `QueueEntry` and its tie-break ordering                    |
//! | [`queue`]   | The `EventQueue` contract every strategy implements        |
//! | [`config`]  | `QueueKind`, `QueueConfig`                                 |
//! | [`error`]   | `QueueError`, `QueueResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod entry;
pub mod error;
pub mod ids;
pub mod queue;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{QueueConfig, QueueKind};
pub use entry::QueueEntry;
pub use error::{QueueError, QueueResult};
pub use ids::{EventId, EventIdGen, EventRef};
pub use queue::EventQueue;
pub use time::{SimTime, VirtualTime};
