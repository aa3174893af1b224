//! Queue selection configuration.
//!
//! The application picks the strategy backing a run through [`QueueConfig`],
//! typically deserialised from a JSON file (with the `serde` feature) and
//! handed to `fes_queue::build_queue`.

use std::fmt;
use std::str::FromStr;

use crate::{QueueError, QueueResult};

/// Default bound on distinct timestamps in the two-tier near future.
pub const DEFAULT_THRESHOLD: usize = 100;

// ── QueueKind ─────────────────────────────────────────────────────────────────

/// The interchangeable event-set strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueueKind {
    Heap,
    SortedSet,
    TwoTier,
}

impl QueueKind {
    pub const ALL: [QueueKind; 3] = [QueueKind::Heap, QueueKind::SortedSet, QueueKind::TwoTier];

    /// Declared relative efficiency; higher is preferred when a run does
    /// not request a strategy explicitly.
    pub fn efficiency_index(self) -> u32 {
        match self {
            QueueKind::Heap => 1,
            QueueKind::SortedSet => 2,
            QueueKind::TwoTier => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QueueKind::Heap => "heap",
            QueueKind::SortedSet => "sorted_set",
            QueueKind::TwoTier => "two_tier",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueKind {
    type Err = QueueError;

    fn from_str(s: &str) -> QueueResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heap" => Ok(QueueKind::Heap),
            "sorted_set" | "sortedset" => Ok(QueueKind::SortedSet),
            "two_tier" | "twotier" | "bucket" => Ok(QueueKind::TwoTier),
            other => Err(QueueError::Config(format!("unknown queue kind '{other}'"))),
        }
    }
}

// ── QueueConfig ───────────────────────────────────────────────────────────────

/// Construction parameters for an event queue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueueConfig {
    /// Strategy to build.  `None` selects the highest `efficiency_index`.
    pub kind: Option<QueueKind>,

    /// Two-tier only: maximum distinct timestamps held in the near future.
    pub threshold: usize,

    /// Two-tier only: buckets moved per far→near refill is
    /// `move_buckets + 1`.  `None` uses `threshold / 2`.
    pub move_buckets: Option<usize>,

    /// Initial capacity hint passed to `set_size_hint`.
    pub capacity_hint: Option<usize>,

    /// Wrap the queue in an observing `ObservableQueue` (applied by the driver).
    pub observe: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            kind:          None,
            threshold:     DEFAULT_THRESHOLD,
            move_buckets:  None,
            capacity_hint: None,
            observe:       false,
        }
    }
}

impl QueueConfig {
    /// Config requesting `kind` with all other fields defaulted.
    pub fn for_kind(kind: QueueKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }

    #[inline]
    pub fn effective_move_buckets(&self) -> usize {
        self.move_buckets.unwrap_or(self.threshold / 2)
    }

    /// Check the two-tier parameters.
    ///
    /// A refill moves `move_buckets + 1` buckets into an empty near tier, so
    /// `move_buckets` must stay below `threshold`.
    pub fn validate(&self) -> QueueResult<()> {
        if self.threshold == 0 {
            return Err(QueueError::Config("threshold must be at least 1".into()));
        }
        let mb = self.effective_move_buckets();
        if mb >= self.threshold {
            return Err(QueueError::Config(format!(
                "move_buckets {mb} must be smaller than threshold {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
