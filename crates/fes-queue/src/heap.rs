//! `HeapEventQueue` — array-backed binary min-heap.
//!
//! # Layout
//!
//! `heap` is a conventional implicit binary heap of [`QueueEntry`] ordered by
//! the entry order (time, then event).  `slots` cross-indexes every queued
//! event to its current position in `heap` and is updated on every swap, so
//! removing or rescheduling a specific event is O(log n) instead of a linear
//! identity scan.
//!
//! Parked (unreachable-time) events live only in `parked`; they never enter
//! the heap, so they can never surface at the root.

use fes_core::queue::check_time;
use fes_core::{EventQueue, EventRef, QueueEntry, QueueResult, SimTime};

use crate::guard::{IndexMap, admit, check_hint};

const NAME: &str = "heap";

/// Binary-heap event set with an event→slot index.
pub struct HeapEventQueue<E, T> {
    heap:   Vec<QueueEntry<E, T>>,
    slots:  IndexMap<E, usize>,
    parked: IndexMap<E, T>,
}

impl<E: EventRef, T: SimTime> Default for HeapEventQueue<E, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventRef, T: SimTime> HeapEventQueue<E, T> {
    pub fn new() -> Self {
        Self {
            heap:   Vec::new(),
            slots:  IndexMap::default(),
            parked: IndexMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut q = Self::new();
        q.heap.reserve(capacity);
        q.slots.reserve(capacity);
        q
    }

    /// Number of parked (unreachable-time) events.
    pub fn parked_len(&self) -> usize {
        self.parked.len()
    }

    // ── Heap primitives ───────────────────────────────────────────────────

    fn push(&mut self, entry: QueueEntry<E, T>) {
        let i = self.heap.len();
        self.slots.insert(entry.event().clone(), i);
        self.heap.push(entry);
        self.sift_up(i);
    }

    /// Remove the entry at heap position `i`.
    fn remove_at(&mut self, i: usize) -> Option<QueueEntry<E, T>> {
        let last = self.heap.len().checked_sub(1)?;
        if i > last {
            return None;
        }
        self.swap(i, last);
        let entry = self.heap.pop()?;
        self.slots.remove(entry.event());
        if i < self.heap.len() {
            // The element moved into `i` may belong above or below it.
            if i > 0 && self.heap[i] < self.heap[(i - 1) / 2] {
                self.sift_up(i);
            } else {
                self.sift_down(i);
            }
        }
        Some(entry)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(slot) = self.slots.get_mut(self.heap[a].event()) {
            *slot = a;
        }
        if let Some(slot) = self.slots.get_mut(self.heap[b].event()) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i] >= self.heap[parent] {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right] < self.heap[left] {
                right
            } else {
                left
            };
            if self.heap[i] <= self.heap[child] {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        for i in 1..self.heap.len() {
            assert!(self.heap[(i - 1) / 2] <= self.heap[i], "heap order violated at {i}");
        }
        assert_eq!(self.slots.len(), self.heap.len());
        for (i, entry) in self.heap.iter().enumerate() {
            assert_eq!(self.slots.get(entry.event()), Some(&i), "stale slot for {:?}", entry.event());
        }
        for e in self.parked.keys() {
            assert!(!self.slots.contains_key(e));
        }
    }
}

impl<E: EventRef, T: SimTime> EventQueue<E, T> for HeapEventQueue<E, T> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn enqueue(&mut self, event: E, time: T) -> QueueResult<()> {
        let queued = self.slots.contains_key(&event) || self.parked.contains_key(&event);
        admit(NAME, &event, time, queued)?;
        if time.is_unreachable() {
            self.parked.insert(event, time);
        } else {
            self.push(QueueEntry::new(event, time));
        }
        Ok(())
    }

    fn dequeue(&mut self) -> Option<QueueEntry<E, T>> {
        self.remove_at(0)
    }

    fn dequeue_event(&mut self, event: &E) -> Option<T> {
        if let Some(time) = self.parked.remove(event) {
            return Some(time);
        }
        let i = *self.slots.get(event)?;
        self.remove_at(i).map(|entry| entry.time())
    }

    fn dequeue_all(&mut self) -> Vec<E> {
        let Some(first) = self.remove_at(0) else {
            return Vec::new();
        };
        let (first, time) = first.into_parts();
        let mut events = vec![first];
        while self.heap.first().is_some_and(|head| head.time() == time) {
            if let Some(entry) = self.remove_at(0) {
                events.push(entry.into_event());
            }
        }
        events
    }

    fn dequeue_all_at(&mut self, time: T) -> Vec<E> {
        if self.heap.first().is_some_and(|head| head.time() == time) {
            return self.dequeue_all();
        }
        // Not at the root: linear scan for the run, then indexed removal.
        let hits: Vec<E> = self
            .heap
            .iter()
            .filter(|entry| entry.time() == time)
            .map(|entry| entry.event().clone())
            .collect();
        for event in &hits {
            if let Some(&i) = self.slots.get(event) {
                self.remove_at(i);
            }
        }
        hits
    }

    fn get_min(&mut self) -> Option<T> {
        self.heap.first().map(QueueEntry::time)
    }

    fn get_time(&self, event: &E) -> Option<T> {
        match self.slots.get(event) {
            Some(&i) => Some(self.heap[i].time()),
            None => self.parked.get(event).copied(),
        }
    }

    fn len(&self) -> usize {
        self.heap.len() + self.parked.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.parked.clear();
    }

    /// Rewrites the entry in place and restores heap order from its slot.
    fn requeue(&mut self, event: E, new_time: T) -> QueueResult<Option<T>> {
        check_time(new_time)?;
        if !new_time.is_unreachable() {
            if let Some(&i) = self.slots.get(&event) {
                let old = self.heap[i].time();
                self.heap[i] = QueueEntry::new(event, new_time);
                if new_time < old {
                    self.sift_up(i);
                } else {
                    self.sift_down(i);
                }
                return Ok(Some(old));
            }
        }
        let Some(old) = self.dequeue_event(&event) else {
            return Ok(None);
        };
        self.enqueue(event, new_time)?;
        Ok(Some(old))
    }

    fn set_size_hint(&mut self, hint: usize) -> QueueResult<()> {
        check_hint(hint, self.len())?;
        let extra = hint - self.len();
        self.heap.reserve(extra);
        self.slots.reserve(extra);
        Ok(())
    }
}
