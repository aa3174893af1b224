//! The `EventQueue` contract.
//!
//! Every strategy (`fes-queue`) and every decorator (`fes-observe`)
//! implements this trait, and the driver (`fes-sim`) only talks to a queue
//! through it.  The trait is object safe: `Box<dyn EventQueue<E, T>>` is
//! itself an `EventQueue`, which is how the configuration layer hands back
//! whichever strategy it selected.
//!
//! # Invariants
//!
//! - An event has at most one outstanding time per queue.  A second
//!   `enqueue` of a queued event fails; reschedule with [`requeue`].
//! - Times before the origin are refused; unreachable times are parked
//!   (see [`SimTime`]).
//! - Lookups of absent events return `None` rather than an error.
//!
//! [`requeue`]: EventQueue::requeue

use crate::{QueueEntry, QueueError, QueueResult, SimTime};

/// Reject times before the simulation origin.
#[inline]
pub fn check_time<T: SimTime>(time: T) -> QueueResult<()> {
    if time.is_before_origin() {
        return Err(QueueError::InvalidTime(format!("{time:?} is before the origin")));
    }
    Ok(())
}

/// Operations every future-event-set strategy provides.
///
/// Not internally synchronised: one driver owns one queue.
pub trait EventQueue<E, T: SimTime> {
    /// Short strategy name, used in logs and by the selection layer.
    fn name(&self) -> &'static str;

    /// Schedule `event` at `time`.
    ///
    /// # Errors
    /// - [`QueueError::InvalidTime`] if `time.is_before_origin()`.
    /// - [`QueueError::DuplicateEvent`] if `event` is already queued.
    fn enqueue(&mut self, event: E, time: T) -> QueueResult<()>;

    /// Remove and return one entry with the global minimum time.
    ///
    /// Among tied entries any may be returned.  Parked entries are never
    /// returned.
    fn dequeue(&mut self) -> Option<QueueEntry<E, T>>;

    /// Remove `event` regardless of its time, returning that time.
    fn dequeue_event(&mut self, event: &E) -> Option<T>;

    /// Remove and return every event at the current minimum time.
    fn dequeue_all(&mut self) -> Vec<E>;

    /// Remove and return every event at exactly `time`.
    fn dequeue_all_at(&mut self, time: T) -> Vec<E>;

    /// The minimum reachable time, without removing anything.
    ///
    /// Takes `&mut self` because bucketed strategies may reorganise their
    /// internal tiers; the observable contents never change.
    fn get_min(&mut self) -> Option<T>;

    fn get_time(&self, event: &E) -> Option<T>;

    /// Number of queued events, parked ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every event.
    fn clear(&mut self);

    /// Move `event` to `new_time`, returning its previous time.
    ///
    /// Equivalent to `dequeue_event` followed by `enqueue`.  Returns
    /// `Ok(None)` and leaves the queue untouched if `event` is absent.
    ///
    /// # Errors
    /// [`QueueError::InvalidTime`] if `new_time` is before the origin; the
    /// event keeps its old time.
    fn requeue(&mut self, event: E, new_time: T) -> QueueResult<Option<T>> {
        check_time(new_time)?;
        let Some(old) = self.dequeue_event(&event) else {
            return Ok(None);
        };
        self.enqueue(event, new_time)?;
        Ok(Some(old))
    }

    /// [`requeue`][Self::requeue] for callers that already know the current
    /// time.  Returns `Ok(None)` if `event` is not queued at `old_time`.
    fn requeue_from(&mut self, event: E, old_time: T, new_time: T) -> QueueResult<Option<T>> {
        if self.get_time(&event) != Some(old_time) {
            return Ok(None);
        }
        self.requeue(event, new_time)
    }

    /// Capacity hint.
    ///
    /// # Errors
    /// [`QueueError::Capacity`] if `hint < self.len()`; the queue is unchanged.
    fn set_size_hint(&mut self, hint: usize) -> QueueResult<()> {
        if hint < self.len() {
            return Err(QueueError::Capacity { hint, len: self.len() });
        }
        Ok(())
    }
}

impl<E, T: SimTime, Q: EventQueue<E, T> + ?Sized> EventQueue<E, T> for Box<Q> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn enqueue(&mut self, event: E, time: T) -> QueueResult<()> {
        (**self).enqueue(event, time)
    }

    fn dequeue(&mut self) -> Option<QueueEntry<E, T>> {
        (**self).dequeue()
    }

    fn dequeue_event(&mut self, event: &E) -> Option<T> {
        (**self).dequeue_event(event)
    }

    fn dequeue_all(&mut self) -> Vec<E> {
        (**self).dequeue_all()
    }

    fn dequeue_all_at(&mut self, time: T) -> Vec<E> {
        (**self).dequeue_all_at(time)
    }

    fn get_min(&mut self) -> Option<T> {
        (**self).get_min()
    }

    fn get_time(&self, event: &E) -> Option<T> {
        (**self).get_time(event)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn requeue(&mut self, event: E, new_time: T) -> QueueResult<Option<T>> {
        (**self).requeue(event, new_time)
    }

    fn requeue_from(&mut self, event: E, old_time: T, new_time: T) -> QueueResult<Option<T>> {
        (**self).requeue_from(event, old_time, new_time)
    }

    fn set_size_hint(&mut self, hint: usize) -> QueueResult<()> {
        (**self).set_size_hint(hint)
    }
}
