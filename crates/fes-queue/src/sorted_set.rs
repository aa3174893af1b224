//! `SortedSetEventQueue` — balanced ordered-set event list.
//!
//! Entries live in a `BTreeSet` under the (time, event) order of
//! [`QueueEntry`], so any number of distinct events can share one timestamp,
//! each in its own slot.  The event slot is an `Option` purely so that a
//! probe `(time, None)` sorts before every real event at `time`; bulk
//! extraction at an arbitrary time is a range walk from that probe rather
//! than a scan.
//!
//! A `Slot` holding `Some(event)` orders exactly like the [`QueueEntry`] for
//! the same pair: time first, then event.  The set never holds a probe;
//! probes only bound range queries.

use std::collections::BTreeSet;

use fes_core::{EventQueue, EventRef, QueueEntry, QueueResult, SimTime};

use crate::guard::{IndexMap, admit, check_hint};

const NAME: &str = "sorted_set";

/// Set key: derived order is time first, then event, `None` lowest.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Slot<E, T> {
    time:  T,
    event: Option<E>,
}

impl<E, T> Slot<E, T> {
    fn probe(time: T) -> Self {
        Self { time, event: None }
    }

    fn of(event: E, time: T) -> Self {
        Self { time, event: Some(event) }
    }
}

/// Ordered-set event list with an event→time index.
pub struct SortedSetEventQueue<E, T> {
    set:   BTreeSet<Slot<E, T>>,
    /// Every queued event, parked ones included.
    times: IndexMap<E, T>,
}

impl<E: EventRef, T: SimTime> Default for SortedSetEventQueue<E, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventRef, T: SimTime> SortedSetEventQueue<E, T> {
    pub fn new() -> Self {
        Self {
            set:   BTreeSet::new(),
            times: IndexMap::default(),
        }
    }

    /// Iterate reachable entries in time order without removing them.
    pub fn iter(&self) -> impl Iterator<Item = QueueEntry<E, T>> + '_ {
        self.set
            .iter()
            .filter_map(|slot| slot.event.clone().map(|e| QueueEntry::new(e, slot.time)))
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        for slot in &self.set {
            let event = slot.event.as_ref().expect("probe slot left in set");
            assert_eq!(self.times.get(event), Some(&slot.time));
        }
        let parked = self.times.values().filter(|t| t.is_unreachable()).count();
        assert_eq!(self.set.len() + parked, self.times.len());
    }
}

impl<E: EventRef, T: SimTime> EventQueue<E, T> for SortedSetEventQueue<E, T> {
    fn name(&self) -> &'static str {
        NAME
    }

    fn enqueue(&mut self, event: E, time: T) -> QueueResult<()> {
        admit(NAME, &event, time, self.times.contains_key(&event))?;
        self.times.insert(event.clone(), time);
        if !time.is_unreachable() {
            self.set.insert(Slot::of(event, time));
        }
        Ok(())
    }

    fn dequeue(&mut self) -> Option<QueueEntry<E, T>> {
        let slot = self.set.pop_first()?;
        let event = slot.event?;
        self.times.remove(&event);
        Some(QueueEntry::new(event, slot.time))
    }

    fn dequeue_event(&mut self, event: &E) -> Option<T> {
        let time = self.times.remove(event)?;
        if !time.is_unreachable() {
            let removed = self.set.remove(&Slot::of(event.clone(), time));
            debug_assert!(removed, "index and set disagree for {event:?}");
        }
        Some(time)
    }

    fn dequeue_all(&mut self) -> Vec<E> {
        match self.set.first() {
            Some(head) => {
                let time = head.time;
                self.dequeue_all_at(time)
            }
            None => Vec::new(),
        }
    }

    fn dequeue_all_at(&mut self, time: T) -> Vec<E> {
        if time.is_unreachable() {
            return Vec::new();
        }
        let hits: Vec<E> = self
            .set
            .range(Slot::probe(time)..)
            .take_while(|slot| slot.time == time)
            .filter_map(|slot| slot.event.clone())
            .collect();
        for event in &hits {
            self.times.remove(event);
            self.set.remove(&Slot::of(event.clone(), time));
        }
        hits
    }

    fn get_min(&mut self) -> Option<T> {
        self.set.first().map(|slot| slot.time)
    }

    fn get_time(&self, event: &E) -> Option<T> {
        self.times.get(event).copied()
    }

    fn len(&self) -> usize {
        self.times.len()
    }

    fn clear(&mut self) {
        self.set.clear();
        self.times.clear();
    }

    fn set_size_hint(&mut self, hint: usize) -> QueueResult<()> {
        check_hint(hint, self.len())?;
        self.times.reserve(hint - self.len());
        Ok(())
    }
}
