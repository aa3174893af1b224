//! Change notifications emitted by [`ObservableQueue`][crate::ObservableQueue].

use fes_core::QueueEntry;

/// One content change of an observed queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueChange<E, T> {
    /// A new entry was queued.
    Enqueued(QueueEntry<E, T>),
    /// One or more entries left the queue, by `dequeue`, `dequeue_event`, or a
    /// bulk extraction.
    Dequeued(Vec<QueueEntry<E, T>>),
    /// An event moved from `old` to `new`.
    Requeued { event: E, old: T, new: T },
    /// The queue was cleared; `removed` entries were dropped.
    Cleared { removed: usize },
}

impl<E, T> QueueChange<E, T> {
    /// Short lowercase label used in traces and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueueChange::Enqueued(_) => "enqueued",
            QueueChange::Dequeued(_) => "dequeued",
            QueueChange::Requeued { .. } => "requeued",
            QueueChange::Cleared { .. } => "cleared",
        }
    }
}

/// Receives every change of an observed queue, after the change is applied.
///
/// Listener methods have no return value; implementations that can fail
/// store their error for later retrieval (see
/// [`CsvTraceListener::take_error`][crate::CsvTraceListener::take_error]).
pub trait QueueListener<E, T> {
    fn on_change(&mut self, change: &QueueChange<E, T>);
}

impl<E, T, L: QueueListener<E, T> + ?Sized> QueueListener<E, T> for Box<L> {
    fn on_change(&mut self, change: &QueueChange<E, T>) {
        (**self).on_change(change);
    }
}

/// A [`QueueListener`] that does nothing.  The decorator still maintains its
/// mirror.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopListener;

impl<E, T> QueueListener<E, T> for NoopListener {
    fn on_change(&mut self, _change: &QueueChange<E, T>) {}
}

/// Keeps every change it receives, in order.
#[derive(Clone, Debug)]
pub struct RecordingListener<E, T> {
    changes: Vec<QueueChange<E, T>>,
}

impl<E, T> Default for RecordingListener<E, T> {
    fn default() -> Self {
        Self { changes: Vec::new() }
    }
}

impl<E, T> RecordingListener<E, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[QueueChange<E, T>] {
        &self.changes
    }

    /// Drain the recorded changes, leaving the listener empty.
    pub fn take(&mut self) -> Vec<QueueChange<E, T>> {
        std::mem::take(&mut self.changes)
    }
}

impl<E: Clone, T: Clone> QueueListener<E, T> for RecordingListener<E, T> {
    fn on_change(&mut self, change: &QueueChange<E, T>) {
        self.changes.push(change.clone());
    }
}
