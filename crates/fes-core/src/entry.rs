//! `QueueEntry` — the (event, time) pair stored by ordered containers.
//!
//! # Ordering
//!
//! Entries are ordered primarily by time.  When two times are equal, the
//! event references break the tie, so:
//!
//! - two *distinct* events at one timestamp never compare `Equal`; an
//!   ordered container built for unique keys gives each its own slot instead
//!   of overwriting the first;
//! - an exact `(event, time)` lookup still resolves to the one matching slot.
//!
//! Generic sorted-container code often assumes `cmp == Equal` means
//! "duplicate".  Under this order that only happens for the same event at the
//! same time, which the one-outstanding-time invariant rules out within a
//! queue.

use std::cmp::Ordering;

/// An immutable pairing of an event reference and its scheduled time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueEntry<E, T> {
    event: E,
    time:  T,
}

impl<E, T: Copy> QueueEntry<E, T> {
    #[inline]
    pub fn new(event: E, time: T) -> Self {
        Self { event, time }
    }

    #[inline]
    pub fn event(&self) -> &E {
        &self.event
    }

    #[inline]
    pub fn time(&self) -> T {
        self.time
    }

    #[inline]
    pub fn into_event(self) -> E {
        self.event
    }

    #[inline]
    pub fn into_parts(self) -> (E, T) {
        (self.event, self.time)
    }
}

impl<E: Ord, T: Ord> PartialOrd for QueueEntry<E, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Ord, T: Ord> Ord for QueueEntry<E, T> {
    /// Time first, then event.  Never `Equal` for distinct events.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.event.cmp(&other.event))
    }
}

impl<E, T: Copy> From<(E, T)> for QueueEntry<E, T> {
    fn from((event, time): (E, T)) -> Self {
        Self::new(event, time)
    }
}
