//! The `Sim` struct and its step loop.

use fes_core::{EventId, EventIdGen, EventQueue, VirtualTime};
use fes_queue::AnyQueue;

use crate::handler::{EventHandler, Scheduler};
use crate::{SimConfig, SimError, SimObserver, SimResult};

/// The discrete-event driver.
///
/// Each step:
///
/// 1. **Peek**: `get_min` on the queue.  Nothing reachable, or a time past
///    `end_time`, ends the run.
/// 2. **Advance**: the clock jumps to that time.
/// 3. **Extract**: `dequeue_all` takes every event due now.
/// 4. **Dispatch**: the [`EventHandler`] runs once per event, scheduling
///    follow-ups through a [`Scheduler`] that rejects the past.
///
/// A handler error ends the step early: the events of the batch that were
/// not yet dispatched go back into the queue at the current time, the step
/// is not counted, and the error is returned.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<H: EventHandler> {
    pub config: SimConfig,

    /// The future event set.  Boxed so the strategy is chosen at run time.
    queue: AnyQueue<EventId, VirtualTime>,

    pub handler: H,

    ids:        EventIdGen,
    now:        VirtualTime,
    steps:      u64,
    dispatched: u64,
}

impl<H: EventHandler> Sim<H> {
    pub(crate) fn new(config: SimConfig, queue: AnyQueue<EventId, VirtualTime>, handler: H) -> Self {
        Self {
            config,
            queue,
            handler,
            ids:        EventIdGen::new(),
            now:        VirtualTime::ZERO,
            steps:      0,
            dispatched: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> VirtualTime {
        self.now
    }

    /// Steps completed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Events handed to the handler so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn queue(&self) -> &dyn EventQueue<EventId, VirtualTime> {
        self.queue.as_ref()
    }

    pub fn queue_mut(&mut self) -> &mut dyn EventQueue<EventId, VirtualTime> {
        self.queue.as_mut()
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Scheduler at the current time, for seeding the initial events.
    pub fn scheduler(&mut self) -> Scheduler<'_> {
        Scheduler::new(self.now, self.queue.as_mut(), &mut self.ids)
    }

    /// Schedule one event at `time` from outside the handler.
    pub fn schedule_at(&mut self, time: VirtualTime) -> SimResult<EventId> {
        self.scheduler().schedule_at(time)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the queue has nothing reachable, `end_time` is passed, or
    /// `max_steps` is reached.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            if self.config.max_steps.is_some_and(|max| self.steps >= max) {
                tracing::debug!(steps = self.steps, "step limit reached");
                break;
            }
            if self.step(observer)?.is_none() {
                break;
            }
        }
        observer.on_sim_end(self.now, self.steps);
        tracing::debug!(
            strategy = self.queue.name(),
            now = %self.now,
            steps = self.steps,
            dispatched = self.dispatched,
            pending = self.queue.len(),
            "run finished"
        );
        Ok(())
    }

    /// Run at most `n` steps from the current position (ignores
    /// `max_steps`).  Returns the number of steps taken.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<u64> {
        let mut taken = 0;
        while taken < n && self.step(observer)?.is_some() {
            taken += 1;
        }
        Ok(taken)
    }

    /// Execute one step.  Returns the number of events dispatched, or `None`
    /// if the run is over.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<usize>> {
        let Some(next) = self.queue.get_min() else {
            return Ok(None);
        };
        if self.config.is_past_end(next) {
            return Ok(None);
        }
        if next < self.now {
            return Err(SimError::Causality { now: self.now, requested: next });
        }
        self.now = next;

        let batch = self.queue.dequeue_all();
        observer.on_step_start(self.now, batch.len());

        let mut handled = 0;
        let mut failure = None;
        let scheduled = {
            let mut sched = Scheduler::new(self.now, self.queue.as_mut(), &mut self.ids);
            for &event in &batch {
                tracing::trace!(event = %event, now = %self.now, "dispatch");
                handled += 1;
                if let Err(err) = self.handler.handle(event, &mut sched) {
                    failure = Some(err);
                    break;
                }
            }
            sched.scheduled()
        };
        if let Some(err) = failure {
            // The failing event counts as dispatched; the rest go back at now.
            self.dispatched += handled as u64;
            self.restore(&batch[handled..]);
            return Err(err);
        }

        self.steps += 1;
        self.dispatched += batch.len() as u64;
        tracing::debug!(now = %self.now, batch = batch.len(), scheduled, "step");
        observer.on_step_end(self.now, batch.len());
        Ok(Some(batch.len()))
    }

    /// Re-queue events that were extracted but never handed to the handler.
    fn restore(&mut self, events: &[EventId]) {
        for &event in events {
            if let Err(err) = self.queue.enqueue(event, self.now) {
                tracing::warn!(event = %event, now = %self.now, %err, "could not restore undispatched event");
            }
        }
        if !events.is_empty() {
            tracing::debug!(now = %self.now, restored = events.len(), "handler failed; batch remainder re-queued");
        }
    }
}
