//! Event dispatch: the [`EventHandler`] trait and the [`Scheduler`] handed
//! to it.

use fes_core::{EventId, EventIdGen, EventQueue, VirtualTime};

use crate::{SimError, SimResult};

/// Model logic executed for every dispatched event.
///
/// Handlers see one event at a time, in the batch order returned by the
/// queue's `dequeue_all`, and schedule follow-ups through the
/// [`Scheduler`].
pub trait EventHandler {
    fn handle(&mut self, event: EventId, sched: &mut Scheduler<'_>) -> SimResult<()>;
}

/// Scheduling view of the queue at the current simulation time.
///
/// Refuses any time earlier than [`now`][Self::now] with
/// [`SimError::Causality`].
pub struct Scheduler<'a> {
    now:       VirtualTime,
    queue:     &'a mut dyn EventQueue<EventId, VirtualTime>,
    ids:       &'a mut EventIdGen,
    scheduled: usize,
}

impl<'a> Scheduler<'a> {
    pub(crate) fn new(
        now:   VirtualTime,
        queue: &'a mut dyn EventQueue<EventId, VirtualTime>,
        ids:   &'a mut EventIdGen,
    ) -> Self {
        Self { now, queue, ids, scheduled: 0 }
    }

    #[inline]
    pub fn now(&self) -> VirtualTime {
        self.now
    }

    /// Events scheduled through this scheduler so far.
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    fn check_causal(&self, time: VirtualTime) -> SimResult<()> {
        if time < self.now {
            return Err(SimError::Causality { now: self.now, requested: time });
        }
        Ok(())
    }

    /// Schedule a new event at absolute `time` and return its id.
    pub fn schedule_at(&mut self, time: VirtualTime) -> SimResult<EventId> {
        self.check_causal(time)?;
        let id = self.ids.next_id();
        self.queue.enqueue(id, time)?;
        self.scheduled += 1;
        tracing::trace!(event = %id, time = %time, "scheduled");
        Ok(id)
    }

    /// Schedule a new event `delay` after now.
    pub fn schedule_in(&mut self, delay: f64) -> SimResult<EventId> {
        self.schedule_at(self.now + delay)
    }

    /// Cancel a pending event.  Returns its time, or `None` if it was not
    /// queued.
    pub fn cancel(&mut self, event: EventId) -> Option<VirtualTime> {
        self.queue.dequeue_event(&event)
    }

    /// Move a pending event to `time`.  Returns its previous time, or `None`
    /// if it was not queued.
    pub fn reschedule(&mut self, event: EventId, time: VirtualTime) -> SimResult<Option<VirtualTime>> {
        self.check_causal(time)?;
        Ok(self.queue.requeue(event, time)?)
    }

    pub fn time_of(&self, event: EventId) -> Option<VirtualTime> {
        self.queue.get_time(&event)
    }

    /// Number of events currently queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
