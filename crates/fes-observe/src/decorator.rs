//! `ObservableQueue` — forwarding decorator with an ordered mirror.
//!
//! # Modes
//!
//! - **Observing**: a `BTreeSet<QueueEntry>` mirror tracks every queued
//!   entry (parked ones included) and the listener receives one
//!   [`QueueChange`] after each call that changed the queue's contents.
//! - **Pass-through**: calls are forwarded and nothing else happens.
//!
//! The wrapped queue is always authoritative; the mirror is advisory and
//! read-only to consumers.

use std::collections::BTreeSet;

use fes_core::{EventQueue, EventRef, QueueEntry, QueueResult, SimTime};

use crate::listener::{NoopListener, QueueChange, QueueListener};

/// Decorator adding observation to any [`EventQueue`].
///
/// Only calls that change the wrapped queue's contents notify.  A rejected
/// `enqueue`, a `dequeue` on an empty queue, a miss in `dequeue_event` or
/// `requeue`, and a `dequeue_all`/`dequeue_all_at` that removes nothing are
/// forwarded but produce no [`QueueChange`].
pub struct ObservableQueue<Q, E, T, L = NoopListener> {
    inner:    Q,
    listener: L,
    /// `None` in pass-through mode.
    mirror:   Option<BTreeSet<QueueEntry<E, T>>>,
}

impl<Q, E, T> ObservableQueue<Q, E, T, NoopListener>
where
    Q: EventQueue<E, T>,
    E: EventRef,
    T: SimTime,
{
    /// Forward every call to `inner` without mirroring or notifying.
    pub fn passthrough(inner: Q) -> Self {
        Self {
            inner,
            listener: NoopListener,
            mirror:   None,
        }
    }
}

impl<Q, E, T, L> ObservableQueue<Q, E, T, L>
where
    Q: EventQueue<E, T>,
    E: EventRef,
    T: SimTime,
    L: QueueListener<E, T>,
{
    /// Observe `inner`, reporting changes to `listener`.
    ///
    /// Entries already in `inner` are not visible to the mirror; wrap the
    /// queue before using it.
    pub fn observing(inner: Q, listener: L) -> Self {
        Self {
            inner,
            listener,
            mirror: Some(BTreeSet::new()),
        }
    }

    pub fn is_observing(&self) -> bool {
        self.mirror.is_some()
    }

    /// Mirrored entries in queue order.  Empty in pass-through mode.
    pub fn mirror(&self) -> impl Iterator<Item = &QueueEntry<E, T>> + '_ {
        self.mirror.iter().flatten()
    }

    /// Owned copy of the mirror, in queue order.
    pub fn snapshot(&self) -> Vec<QueueEntry<E, T>> {
        self.mirror().cloned().collect()
    }

    pub fn mirror_len(&self) -> usize {
        self.mirror.as_ref().map_or(0, BTreeSet::len)
    }

    pub fn inner(&self) -> &Q {
        &self.inner
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Unwrap into the wrapped queue and the listener.
    pub fn into_parts(self) -> (Q, L) {
        (self.inner, self.listener)
    }

    // ── Mirror upkeep ─────────────────────────────────────────────────────

    fn notify(&mut self, change: QueueChange<E, T>) {
        tracing::trace!(strategy = self.inner.name(), change = change.kind(), "queue change");
        self.listener.on_change(&change);
    }

    fn record_removed(&mut self, removed: Vec<QueueEntry<E, T>>) {
        let Some(mirror) = self.mirror.as_mut() else {
            return;
        };
        if removed.is_empty() {
            return;
        }
        for entry in &removed {
            mirror.remove(entry);
        }
        self.notify(QueueChange::Dequeued(removed));
    }

    fn record_moved(&mut self, event: E, old: T, new: T) {
        let Some(mirror) = self.mirror.as_mut() else {
            return;
        };
        mirror.remove(&QueueEntry::new(event.clone(), old));
        mirror.insert(QueueEntry::new(event.clone(), new));
        self.notify(QueueChange::Requeued { event, old, new });
    }

    fn stamp(events: &[E], time: T) -> Vec<QueueEntry<E, T>> {
        events.iter().map(|e| QueueEntry::new(e.clone(), time)).collect()
    }
}

impl<Q, E, T, L> EventQueue<E, T> for ObservableQueue<Q, E, T, L>
where
    Q: EventQueue<E, T>,
    E: EventRef,
    T: SimTime,
    L: QueueListener<E, T>,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn enqueue(&mut self, event: E, time: T) -> QueueResult<()> {
        if !self.is_observing() {
            return self.inner.enqueue(event, time);
        }
        self.inner.enqueue(event.clone(), time)?;
        let entry = QueueEntry::new(event, time);
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.insert(entry.clone());
        }
        self.notify(QueueChange::Enqueued(entry));
        Ok(())
    }

    fn dequeue(&mut self) -> Option<QueueEntry<E, T>> {
        let entry = self.inner.dequeue()?;
        self.record_removed(vec![entry.clone()]);
        Some(entry)
    }

    fn dequeue_event(&mut self, event: &E) -> Option<T> {
        let time = self.inner.dequeue_event(event)?;
        self.record_removed(vec![QueueEntry::new(event.clone(), time)]);
        Some(time)
    }

    fn dequeue_all(&mut self) -> Vec<E> {
        if !self.is_observing() {
            return self.inner.dequeue_all();
        }
        let Some(time) = self.inner.get_min() else {
            return Vec::new();
        };
        let events = self.inner.dequeue_all();
        self.record_removed(Self::stamp(&events, time));
        events
    }

    fn dequeue_all_at(&mut self, time: T) -> Vec<E> {
        let events = self.inner.dequeue_all_at(time);
        if self.is_observing() {
            self.record_removed(Self::stamp(&events, time));
        }
        events
    }

    fn get_min(&mut self) -> Option<T> {
        self.inner.get_min()
    }

    fn get_time(&self, event: &E) -> Option<T> {
        self.inner.get_time(event)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn clear(&mut self) {
        let removed = self.inner.len();
        self.inner.clear();
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.clear();
            if removed > 0 {
                self.notify(QueueChange::Cleared { removed });
            }
        }
    }

    fn requeue(&mut self, event: E, new_time: T) -> QueueResult<Option<T>> {
        let old = self.inner.requeue(event.clone(), new_time)?;
        if let Some(old) = old {
            self.record_moved(event, old, new_time);
        }
        Ok(old)
    }

    fn requeue_from(&mut self, event: E, old_time: T, new_time: T) -> QueueResult<Option<T>> {
        let old = self.inner.requeue_from(event.clone(), old_time, new_time)?;
        if let Some(old) = old {
            self.record_moved(event, old, new_time);
        }
        Ok(old)
    }

    fn set_size_hint(&mut self, hint: usize) -> QueueResult<()> {
        self.inner.set_size_hint(hint)
    }
}
