//! Event identity.
//!
//! Queues are generic over the event reference type `E`; the only thing they
//! ask of it is the [`EventRef`] bound.  [`EventId`] is the framework's own
//! reference type, minted by [`EventIdGen`] in strictly increasing order so
//! that the tie-break among same-time events follows creation order.

use std::fmt;
use std::hash::Hash;

/// Bound satisfied by every type usable as an event reference.
///
/// `Eq + Hash` give identity lookups, `Ord` gives the deterministic tie-break
/// used by [`QueueEntry`][crate::QueueEntry].  An event's identity must not
/// change while it is queued.
pub trait EventRef: Clone + Eq + Ord + Hash + fmt::Debug {}

impl<E: Clone + Eq + Ord + Hash + fmt::Debug> EventRef for E {}

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Opaque identifier of a scheduled simulation event.
    pub struct EventId(u64);
}

// ── EventIdGen ────────────────────────────────────────────────────────────────

/// Strictly increasing [`EventId`] generator.
///
/// Each driver owns exactly one.  The simulation is single-threaded per
/// queue, so the counter is trivially deterministic.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventIdGen {
    next: u64,
}

impl EventIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `start` (replaying or forking a run).
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }

    /// The ID the next call to [`next_id`][Self::next_id] will return.
    pub fn peek(&self) -> EventId {
        EventId(self.next)
    }
}
