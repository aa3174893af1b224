//! Strategy selection.
//!
//! Turns a [`QueueConfig`] into a boxed [`EventQueue`].  When the config does
//! not name a strategy the one with the highest declared
//! [`QueueKind::efficiency_index`] is used.

use fes_core::{EventQueue, EventRef, QueueConfig, QueueKind, QueueResult, SimTime};

use crate::{HeapEventQueue, SortedSetEventQueue, TwoTierEventQueue};

/// A type-erased event queue, as returned by [`build_queue`].
pub type AnyQueue<E, T> = Box<dyn EventQueue<E, T>>;

/// The strategy `config` resolves to.
pub fn resolve_kind(config: &QueueConfig) -> QueueKind {
    config.kind.unwrap_or_else(|| {
        QueueKind::ALL
            .into_iter()
            .max_by_key(|kind| kind.efficiency_index())
            .unwrap_or(QueueKind::Heap)
    })
}

/// Construct the queue described by `config`.
///
/// `config.capacity_hint`, if set, is applied with `set_size_hint`.
/// `config.observe` is not handled here; wrapping belongs to the caller.
///
/// # Errors
/// [`QueueError::Config`][fes_core::QueueError::Config] for invalid two-tier
/// parameters.
pub fn build_queue<E, T>(config: &QueueConfig) -> QueueResult<AnyQueue<E, T>>
where
    E: EventRef + 'static,
    T: SimTime + 'static,
{
    let kind = resolve_kind(config);
    let mut queue: AnyQueue<E, T> = match kind {
        QueueKind::Heap => Box::new(HeapEventQueue::new()),
        QueueKind::SortedSet => Box::new(SortedSetEventQueue::new()),
        QueueKind::TwoTier => Box::new(TwoTierEventQueue::from_config(config)?),
    };
    if let Some(hint) = config.capacity_hint {
        queue.set_size_hint(hint)?;
    }
    tracing::debug!(
        strategy = %kind,
        explicit = config.kind.is_some(),
        efficiency_index = kind.efficiency_index(),
        "selected event queue strategy"
    );
    Ok(queue)
}
