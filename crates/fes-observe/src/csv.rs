//! CSV change trace.
//!
//! One row per affected entry:
//!
//! ```text
//! seq,change,event,time
//! 0,enqueued,EventId(0),1.5
//! 1,dequeued,EventId(0),1.5
//! 2,cleared,,
//! ```
//!
//! `seq` counts changes, so the rows of one bulk extraction share a `seq`.
//! A requeue row carries the new time.

use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::listener::{QueueChange, QueueListener};
use crate::{TraceError, TraceResult};

const HEADER: [&str; 4] = ["seq", "change", "event", "time"];

/// Writes every queue change as CSV rows to `W`.
///
/// Errors from the writer are stored internally because
/// [`QueueListener::on_change`] has no return value.  Check with
/// [`take_error`][Self::take_error] once the run is over.
pub struct CsvTraceListener<W: Write> {
    writer:     Writer<W>,
    seq:        u64,
    last_error: Option<TraceError>,
}

impl CsvTraceListener<File> {
    /// Create (or truncate) the trace file at `path` and write the header.
    pub fn from_path(path: &Path) -> TraceResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvTraceListener<W> {
    /// Wrap `sink` and write the header row.
    pub fn new(sink: W) -> TraceResult<Self> {
        let mut writer = Writer::from_writer(sink);
        writer.write_record(HEADER)?;
        Ok(Self {
            writer,
            seq:        0,
            last_error: None,
        })
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Number of changes written so far.
    pub fn changes_written(&self) -> u64 {
        self.seq
    }

    pub fn flush(&mut self) -> TraceResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(self) -> TraceResult<W> {
        self.writer.into_inner().map_err(|e| TraceError::Io(e.into_error()))
    }

    fn row(&mut self, change: &str, event: String, time: String) -> TraceResult<()> {
        self.writer.write_record([self.seq.to_string(), change.to_owned(), event, time])?;
        Ok(())
    }

    fn write_change<E: Display, T: Display + Copy>(&mut self, change: &QueueChange<E, T>) -> TraceResult<()> {
        let kind = change.kind();
        match change {
            QueueChange::Enqueued(entry) => {
                self.row(kind, entry.event().to_string(), entry.time().to_string())?;
            }
            QueueChange::Dequeued(entries) => {
                for entry in entries {
                    self.row(kind, entry.event().to_string(), entry.time().to_string())?;
                }
            }
            QueueChange::Requeued { event, new, .. } => {
                self.row(kind, event.to_string(), new.to_string())?;
            }
            QueueChange::Cleared { .. } => {
                self.row(kind, String::new(), String::new())?;
            }
        }
        Ok(())
    }

    fn store_err(&mut self, result: TraceResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "change trace write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<E: Display, T: Display + Copy, W: Write> QueueListener<E, T> for CsvTraceListener<W> {
    fn on_change(&mut self, change: &QueueChange<E, T>) {
        let result = self.write_change(change);
        self.store_err(result);
        self.seq += 1;
    }
}
