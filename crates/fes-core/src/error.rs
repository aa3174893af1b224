//! Queue error type.
//!
//! Only genuinely exceptional conditions are errors.  "Event not queued" is
//! reported through `Option::None` by every lookup and removal operation, so
//! callers must check the return value rather than match on this enum.

use thiserror::Error;

/// The error type shared by every [`EventQueue`][crate::EventQueue] strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `set_size_hint` was called with a hint smaller than the current length.
    #[error("capacity hint {hint} is below the current element count {len}")]
    Capacity { hint: usize, len: usize },

    /// The time lies before the simulation origin (negative or NaN).
    #[error("invalid event time: {0}")]
    InvalidTime(String),

    /// The event already has an outstanding scheduled time in this queue.
    #[error("event {0} is already queued; use requeue to reschedule it")]
    DuplicateEvent(String),

    #[error("queue configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `fes-*` queue operations.
pub type QueueResult<T> = Result<T, QueueError>;
