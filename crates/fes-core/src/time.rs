//! Simulation time model.
//!
//! # Design
//!
//! Every queue is generic over a timestamp type implementing [`SimTime`].  The
//! only requirement is a total order: the queues never do arithmetic on
//! times, they only compare them and use them as map keys.
//!
//! The dominant instantiation is [`VirtualTime`], a 64-bit floating-point
//! virtual clock.  Raw `f64` is only partially ordered (NaN) and has two
//! zeros, so `VirtualTime` wraps it with [`f64::total_cmp`] and normalises
//! `-0.0` to `0.0` on construction.  Equal-looking times produced by
//! different arithmetic paths (`0.1 + 0.2` vs `0.3`) are still distinct
//! timestamps; callers must tolerate that.
//!
//! Integer clocks (`u64`, `u32`, `i64`) implement `SimTime` as well.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A totally ordered timestamp usable as a queue key.
///
/// The two classification hooks let a time type tell the queues about values
/// that need special handling.  Both default to `false`.
pub trait SimTime: Copy + Ord + Hash + fmt::Debug {
    /// `true` for times before the simulation origin.  Queues refuse to
    /// enqueue them with [`QueueError::InvalidTime`][crate::QueueError].
    #[inline]
    fn is_before_origin(&self) -> bool {
        false
    }

    /// `true` for times that can never be reached by advancing the clock.
    /// Queues accept and index such events but park them: they are never
    /// returned by `dequeue`/`dequeue_all`, only removed by reference.
    #[inline]
    fn is_unreachable(&self) -> bool {
        false
    }
}

impl SimTime for u64 {}
impl SimTime for u32 {}

impl SimTime for i64 {
    #[inline]
    fn is_before_origin(&self) -> bool {
        *self < 0
    }
}

// ── VirtualTime ───────────────────────────────────────────────────────────────

/// A floating-point virtual timestamp with a total order.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct VirtualTime(f64);

impl VirtualTime {
    pub const ZERO: VirtualTime = VirtualTime(0.0);
    pub const INFINITY: VirtualTime = VirtualTime(f64::INFINITY);

    /// Wrap `secs`, normalising negative zero.
    #[inline]
    pub fn new(secs: f64) -> Self {
        // -0.0 == 0.0 under IEEE comparison, so this also catches -0.0.
        if secs == 0.0 {
            VirtualTime(0.0)
        } else {
            VirtualTime(secs)
        }
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Return the time `delay` after `self`.
    #[inline]
    pub fn offset(self, delay: f64) -> VirtualTime {
        VirtualTime::new(self.0 + delay)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl SimTime for VirtualTime {
    #[inline]
    fn is_before_origin(&self) -> bool {
        self.0.is_nan() || self.0 < 0.0
    }

    #[inline]
    fn is_unreachable(&self) -> bool {
        self.0 == f64::INFINITY
    }
}

impl PartialEq for VirtualTime {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for VirtualTime {}

impl PartialOrd for VirtualTime {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VirtualTime {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for VirtualTime {
    // Consistent with `total_cmp` equality: equal values have equal bits.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for VirtualTime {
    #[inline]
    fn from(secs: f64) -> Self {
        VirtualTime::new(secs)
    }
}

impl From<VirtualTime> for f64 {
    #[inline]
    fn from(t: VirtualTime) -> f64 {
        t.0
    }
}

impl std::ops::Add<f64> for VirtualTime {
    type Output = VirtualTime;
    #[inline]
    fn add(self, rhs: f64) -> VirtualTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for VirtualTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: VirtualTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for VirtualTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
