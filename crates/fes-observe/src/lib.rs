//! `fes-observe` — watching an event queue from the outside.
//!
//! [`ObservableQueue`] wraps any [`EventQueue`][fes_core::EventQueue] by
//! composition.  Every call is forwarded verbatim; in observing mode the
//! decorator additionally keeps an ordered mirror of the queued entries and
//! reports each content change to a [`QueueListener`].
//!
//! ```rust,ignore
//! use fes_observe::{ObservableQueue, RecordingListener};
//! use fes_queue::HeapEventQueue;
//!
//! let mut q = ObservableQueue::observing(HeapEventQueue::new(), RecordingListener::new());
//! q.enqueue(EventId(0), VirtualTime::new(1.0))?;
//! assert_eq!(q.listener().changes().len(), 1);
//! ```
//!
//! # Listeners
//!
//! | Listener             | Behaviour                                        |
//! |----------------------|--------------------------------------------------|
//! | [`NoopListener`]     | Ignores every change (mirror only).              |
//! | [`RecordingListener`]| Keeps every change in memory.                    |
//! | [`CsvTraceListener`] | Writes `seq,change,event,time` rows to any `Write`. |

pub mod csv;
pub mod decorator;
pub mod error;
pub mod listener;


pub use crate::csv::CsvTraceListener;
pub use decorator::ObservableQueue;
pub use error::{TraceError, TraceResult};
pub use listener::{NoopListener, QueueChange, QueueListener, RecordingListener};
