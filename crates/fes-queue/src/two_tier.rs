//! `TwoTierEventQueue` — near/far bucket queue tuned for temporal locality.
//!
//! # Tiers
//!
//! The near tier holds at most `threshold` distinct timestamps, the earliest
//! ones in the queue.  Everything later sits in the unbounded far tier, which
//! is only read when the near tier drains.
//!
//! # Tier invariants
//!
//! ```text
//! every near key  <  min_far  ≤  every far key      (min_far = None: no bound)
//! near.len()      ≤  threshold
//! max_near        =  largest near key
//! ```
//!
//! `min_far` is advisory: removals may leave it below the true far minimum,
//! which only routes some later inserts to far instead of near.
//!
//! # Refill
//!
//! When near is empty and far is not, the `move_buckets + 1` smallest far
//! buckets move to near wholesale.  `max_near` becomes the largest moved key
//! and `min_far` the next far key.  Bucketing by exact timestamp means the
//! relative order of same-time events is not preserved (a bucket pops LIFO).

use std::collections::BTreeMap;

use fes_core::config::DEFAULT_THRESHOLD;
use fes_core::queue::check_time;
use fes_core::{EventQueue, EventRef, QueueConfig, QueueEntry, QueueResult, SimTime};

use crate::guard::{IndexMap, admit, check_hint};

const NAME: &str = "two_tier";

/// Two-tier bucketed event set.
pub struct TwoTierEventQueue<E, T> {
    near:         BTreeMap<T, Vec<E>>,
    far:          BTreeMap<T, Vec<E>>,
    /// Every queued event, parked ones included.
    times:        IndexMap<E, T>,
    max_near:     Option<T>,
    min_far:      Option<T>,
    threshold:    usize,
    move_buckets: usize,
    refills:      u64,
}

impl<E: EventRef, T: SimTime> Default for TwoTierEventQueue<E, T> {
    fn default() -> Self {
        Self::build(DEFAULT_THRESHOLD, DEFAULT_THRESHOLD / 2)
    }
}

impl<E: EventRef, T: SimTime> TwoTierEventQueue<E, T> {
    /// Queue with `threshold` near buckets and the default `threshold / 2`
    /// move count.
    ///
    /// # Errors
    /// [`QueueError::Config`][fes_core::QueueError::Config] if `threshold` is 0.
    pub fn new(threshold: usize) -> QueueResult<Self> {
        Self::from_config(&QueueConfig { threshold, ..QueueConfig::default() })
    }

    /// # Errors
    /// [`QueueError::Config`][fes_core::QueueError::Config] unless
    /// `0 < threshold` and `move_buckets < threshold`.
    pub fn with_move_buckets(threshold: usize, move_buckets: usize) -> QueueResult<Self> {
        Self::from_config(&QueueConfig {
            threshold,
            move_buckets: Some(move_buckets),
            ..QueueConfig::default()
        })
    }

    /// Build from the two-tier fields of `config`; other fields are ignored.
    pub fn from_config(config: &QueueConfig) -> QueueResult<Self> {
        config.validate()?;
        Ok(Self::build(config.threshold, config.effective_move_buckets()))
    }

    fn build(threshold: usize, move_buckets: usize) -> Self {
        Self {
            near: BTreeMap::new(),
            far: BTreeMap::new(),
            times: IndexMap::default(),
            max_near: None,
            min_far: None,
            threshold,
            move_buckets,
            refills: 0,
        }
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn move_buckets(&self) -> usize {
        self.move_buckets
    }

    /// Distinct timestamps currently in the near tier, ascending.
    pub fn near_times(&self) -> Vec<T> {
        self.near.keys().copied().collect()
    }

    /// Distinct timestamps currently in the far tier, ascending.
    pub fn far_times(&self) -> Vec<T> {
        self.far.keys().copied().collect()
    }

    /// Number of far→near refills performed since construction.
    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    // ── Tier management ───────────────────────────────────────────────────

    #[inline]
    fn below_min_far(&self, time: T) -> bool {
        self.min_far.is_none_or(|min| time < min)
    }

    fn place(&mut self, event: E, time: T) {
        if !self.below_min_far(time) {
            self.far.entry(time).or_default().push(event);
            return;
        }
        if let Some(bucket) = self.near.get_mut(&time) {
            bucket.push(event);
            return;
        }
        if self.near.len() < self.threshold {
            self.near.insert(time, vec![event]);
            self.max_near = Some(self.max_near.map_or(time, |max| max.max(time)));
            return;
        }
        match self.max_near {
            Some(max) if time > max => {
                self.far.entry(time).or_default().push(event);
                self.min_far = Some(time);
            }
            _ => {
                self.evict_max_near();
                self.near.insert(time, vec![event]);
                self.max_near = self.near.keys().next_back().copied();
            }
        }
    }

    /// Move the whole `max_near` bucket to far and lower `min_far` to it.
    fn evict_max_near(&mut self) {
        let Some(max) = self.max_near else {
            return;
        };
        if let Some(bucket) = self.near.remove(&max) {
            tracing::debug!(time = ?max, events = bucket.len(), "two-tier: evicting near bucket to far");
            self.far.entry(max).or_default().extend(bucket);
            self.min_far = Some(max);
        }
        self.max_near = self.near.keys().next_back().copied();
    }

    /// Refill an empty near tier from the smallest far buckets.
    fn ensure_near(&mut self) {
        if !self.near.is_empty() || self.far.is_empty() {
            return;
        }
        let group: Vec<T> = self.far.keys().take(self.move_buckets + 1).copied().collect();
        for time in &group {
            if let Some(bucket) = self.far.remove(time) {
                self.near.insert(*time, bucket);
            }
        }
        self.max_near = group.last().copied();
        self.min_far = self.far.keys().next().copied();
        self.refills += 1;
        tracing::debug!(
            moved = group.len(),
            far_remaining = self.far.len(),
            refills = self.refills,
            "two-tier: refilled near tier from far"
        );
    }

    /// A near bucket at `time` was deleted.
    fn near_bucket_dropped(&mut self, time: T) {
        if self.max_near == Some(time) {
            self.max_near = self.near.keys().next_back().copied();
        }
    }

    /// Remove `event` from the bucket at `time`, deleting the bucket if it
    /// empties.  Returns `Some(emptied)` if the event was found.
    fn take_from(map: &mut BTreeMap<T, Vec<E>>, time: T, event: &E) -> Option<bool> {
        let bucket = map.get_mut(&time)?;
        let pos = bucket.iter().position(|e| e == event)?;
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            map.remove(&time);
            Some(true)
        } else {
            Some(false)
        }
    }

    /// Remove an indexed event from whichever tier holds its bucket.
    fn unbucket(&mut self, event: &E, time: T) {
        match Self::take_from(&mut self.near, time, event) {
            Some(true) => self.near_bucket_dropped(time),
            Some(false) => {}
            None => {
                let found = Self::take_from(&mut self.far, time, event);
                debug_assert!(found.is_some(), "indexed event {event:?} missing from both tiers");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.near.len() <= self.threshold, "near over threshold");
        assert_eq!(self.max_near, self.near.keys().next_back().copied(), "stale max_near");
        if let Some(min_far) = self.min_far {
            assert!(self.near.keys().all(|t| *t < min_far), "near key at or above min_far");
            assert!(self.far.keys().all(|t| *t >= min_far), "far key below min_far");
        }
        let bucketed: usize = self.near.values().chain(self.far.values()).map(Vec::len).sum();
        let parked = self.times.values().filter(|t| t.is_unreachable()).count();
        assert_eq!(bucketed + parked, self.times.len());
        for (time, bucket) in self.near.iter().chain(self.far.iter()) {
            assert!(!bucket.is_empty(), "empty bucket left at {time:?}");
            for e in bucket {
                assert_eq!(self.times.get(e), Some(time));
            }
        }
    }
}

impl<E: EventRef, T: SimTime> EventQueue<E, T> for TwoTierEventQueue<E, T> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn enqueue(&mut self, event: E, time: T) -> QueueResult<()> {
        admit(NAME, &event, time, self.times.contains_key(&event))?;
        self.times.insert(event.clone(), time);
        if !time.is_unreachable() {
            self.place(event, time);
        }
        Ok(())
    }

    fn dequeue(&mut self) -> Option<QueueEntry<E, T>> {
        self.ensure_near();
        let (time, event, emptied) = {
            let mut slot = self.near.first_entry()?;
            let time = *slot.key();
            let event = slot.get_mut().pop()?;
            let emptied = slot.get().is_empty();
            if emptied {
                slot.remove();
            }
            (time, event, emptied)
        };
        if emptied {
            self.near_bucket_dropped(time);
        }
        self.times.remove(&event);
        Some(QueueEntry::new(event, time))
    }

    fn dequeue_event(&mut self, event: &E) -> Option<T> {
        let time = self.times.remove(event)?;
        if !time.is_unreachable() {
            self.unbucket(event, time);
        }
        Some(time)
    }

    fn dequeue_all(&mut self) -> Vec<E> {
        self.ensure_near();
        match self.near.keys().next().copied() {
            Some(time) => self.dequeue_all_at(time),
            None => Vec::new(),
        }
    }

    fn dequeue_all_at(&mut self, time: T) -> Vec<E> {
        if time.is_unreachable() {
            return Vec::new();
        }
        let bucket = match self.near.remove(&time) {
            Some(bucket) => {
                self.near_bucket_dropped(time);
                bucket
            }
            None => self.far.remove(&time).unwrap_or_default(),
        };
        for event in &bucket {
            self.times.remove(event);
        }
        bucket
    }

    fn get_min(&mut self) -> Option<T> {
        self.ensure_near();
        self.near.keys().next().copied()
    }

    fn get_time(&self, event: &E) -> Option<T> {
        self.times.get(event).copied()
    }

    fn len(&self) -> usize {
        self.times.len()
    }

    fn clear(&mut self) {
        self.near.clear();
        self.far.clear();
        self.times.clear();
        self.max_near = None;
        self.min_far = None;
    }

    /// Goes straight to the bucket at `old_time`.
    fn requeue_from(&mut self, event: E, old_time: T, new_time: T) -> QueueResult<Option<T>> {
        check_time(new_time)?;
        if self.times.get(&event) != Some(&old_time) {
            return Ok(None);
        }
        self.times.remove(&event);
        if !old_time.is_unreachable() {
            self.unbucket(&event, old_time);
        }
        self.enqueue(event, new_time)?;
        Ok(Some(old_time))
    }

    fn set_size_hint(&mut self, hint: usize) -> QueueResult<()> {
        check_hint(hint, self.len())?;
        self.times.reserve(hint - self.len());
        Ok(())
    }
}
