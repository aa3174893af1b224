//! `fes-queue` — interchangeable future-event-set strategies.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`heap`]        | `HeapEventQueue`: binary min-heap + event→slot index  |
//! | [`sorted_set`]  | `SortedSetEventQueue`: `BTreeSet` of (time, event)    |
//! | [`two_tier`]    | `TwoTierEventQueue`: bounded near / unbounded far     |
//! | [`select`]      | `build_queue`, `resolve_kind`, `AnyQueue`             |
//!
//! All three strategies implement [`fes_core::EventQueue`] with identical
//! observable semantics for reachable, non-negative times; they differ only
//! in cost profile and in the order of same-time events.
//!
//! | Strategy     | enqueue    | dequeue    | dequeue_event | dequeue_all    |
//! |--------------|------------|------------|---------------|----------------|
//! | Heap         | O(log n)   | O(log n)   | O(log n)      | O(m log n)     |
//! | SortedSet    | O(log n)   | O(log n)   | O(log n)      | O(log n + m)   |
//! | TwoTier      | O(log k)†  | O(log k)†  | O(log k + b)  | O(log k + m)   |
//!
//! † k ≤ `threshold` distinct near timestamps; amortised over far→near
//! refills.  b is the size of the event's bucket.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for per-event indices.         |

mod guard;

pub mod heap;
pub mod select;
pub mod sorted_set;
pub mod two_tier;

#[cfg(test)]
mod tests;

pub use heap::HeapEventQueue;
pub use select::{AnyQueue, build_queue, resolve_kind};
pub use sorted_set::SortedSetEventQueue;
pub use two_tier::TwoTierEventQueue;
