//! Admission checks and index map type shared by every strategy.

use std::fmt;

use fes_core::{QueueError, QueueResult, SimTime};

#[cfg(feature = "fx-hash")]
pub(crate) type IndexMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type IndexMap<K, V> = std::collections::HashMap<K, V>;

/// Refuse times before the origin and events that are already queued.
///
/// Rejections are logged at `warn` so a driver that ignores the returned
/// error still leaves a trace.
pub(crate) fn admit<E: fmt::Debug, T: SimTime>(
    strategy: &'static str,
    event:    &E,
    time:     T,
    queued:   bool,
) -> QueueResult<()> {
    if time.is_before_origin() {
        tracing::warn!(strategy, ?event, ?time, "rejected enqueue before the time origin");
        return Err(QueueError::InvalidTime(format!(
            "{event:?} scheduled at {time:?}, before the origin"
        )));
    }
    if queued {
        tracing::warn!(strategy, ?event, ?time, "rejected duplicate enqueue");
        return Err(QueueError::DuplicateEvent(format!("{event:?}")));
    }
    Ok(())
}

/// Fail with [`QueueError::Capacity`] when `hint` is below `len`.
pub(crate) fn check_hint(hint: usize, len: usize) -> QueueResult<()> {
    if hint < len {
        return Err(QueueError::Capacity { hint, len });
    }
    Ok(())
}
