//! A single topic: one log file guarded by one exclusive lock
//!
//! Appends and reads on the same topic are mutually exclusive. The lock is a
//! plain mutex rather than a reader/writer lock, so concurrent reads of one
//! topic also serialize. Operations on different topics never contend.
//!
//! ## Backward Scan
//!
//! Reads never consult an index. [`Topic::read_since`] starts at the end of
//! the file and walks toward the cursor one trailer at a time:
//!
//! ```text
//!  cursor                                              end
//!    │   ┌─────────┬──┐┌───────────┬──┐┌──────┬──┐      │
//!  ──┴───│ payload │L1││  payload  │L2││ pay. │L3│──────┘
//!        └─────────┴──┘└───────────┴──┘└──────┴──┘
//!                   ◄──────────────────────────── scan direction
//! ```
//!
//! The cost of a read is proportional to the bytes appended since the
//! cursor, not to the size of the log.

use crate::durability::DurabilityMode;
use crate::format;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tailbus_core::{Cursor, Error, Event, Result};
use tracing::{debug, warn};

/// Result of an incremental read
///
/// Serializes as `{"seek": <cursor>, "events": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadBatch {
    /// Cursor to pass to the next read
    #[serde(rename = "seek")]
    pub cursor: Cursor,
    /// Events appended since the requested cursor, oldest first
    pub events: Vec<Event>,
}

impl ReadBatch {
    /// Number of events in the batch
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the batch has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A named, append-only event log
pub struct Topic {
    name: String,
    path: PathBuf,
    durability: DurabilityMode,
    /// Serializes every operation on the log file
    lock: Mutex<()>,
}

impl Topic {
    /// Create a topic handle for the log at `path`
    ///
    /// Does not touch the filesystem.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, durability: DurabilityMode) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            durability,
            lock: Mutex::new(()),
        }
    }

    /// Topic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the backing log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event to the tail of the log
    pub fn append(&self, event: &Event) -> Result<()> {
        self.append_batch(std::slice::from_ref(event))
    }

    /// Append several events under one lock acquisition
    ///
    /// The events land contiguously, in the order given. Every payload is
    /// encoded and size-checked before the first byte is written, so an
    /// oversized event rejects the whole batch.
    pub fn append_batch(&self, events: &[Event]) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let payloads = events
            .iter()
            .map(|event| {
                let payload = format::encode_event(event)?;
                format::check_payload_len(payload.len())?;
                Ok(payload)
            })
            .collect::<Result<Vec<_>>>()?;

        let _guard = self.lock.lock();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for payload in &payloads {
            format::append_record(&mut writer, payload)?;
        }
        let file = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;

        if self.durability.requires_sync() {
            file.sync_data()?;
        }

        debug!(topic = %self.name, count = events.len(), "appended events");
        Ok(())
    }

    /// Read every event appended after `cursor`
    ///
    /// [`Cursor::START`] returns the whole log. The returned cursor is the
    /// log size at the time of the read and is the cursor to pass next time.
    ///
    /// A record whose start lies before `cursor` belongs to a previous read:
    /// it is decoded, then dropped, and ends the scan. On [`Error::CorruptLog`] no events are returned.
    pub fn read_since(&self, cursor: Cursor) -> Result<ReadBatch> {
        let _guard = self.lock.lock();

        let mut file = self.open_log()?;
        let end = file.metadata()?.len();

        let events = scan_back(&mut file, end, cursor.offset()).map_err(|e| {
            if e.is_corrupt() {
                warn!(topic = %self.name, error = %e, "corrupt topic log");
            }
            e
        })?;

        debug!(
            topic = %self.name,
            from = cursor.offset(),
            to = end,
            count = events.len(),
            "read events"
        );

        Ok(ReadBatch {
            cursor: Cursor::new(end),
            events,
        })
    }

    /// Current size of the log in bytes
    pub fn len_bytes(&self) -> Result<u64> {
        let _guard = self.lock.lock();
        Ok(self.open_log()?.metadata()?.len())
    }

    fn open_log(&self) -> Result<File> {
        File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                Error::NotFound(format!("log file for topic '{}'", self.name))
            }
            _ => Error::Io(e),
        })
    }
}

impl std::fmt::Debug for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("durability", &self.durability)
            .finish()
    }
}

/// Walk backward from `end`, collecting records that start at or after `cutoff`
///
/// Every record visited is decoded, including the one that crosses `cutoff`,
/// so a torn tail pointing back past the cursor is reported as corrupt.
/// Returns the events oldest first.
fn scan_back(file: &mut File, end: u64, cutoff: u64) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    let mut pos = end;

    while pos > cutoff {
        let (len, start) = format::read_trailer(file, pos)?;
        let payload = format::read_payload(file, start, len)?;
        let event = format::decode_event(&payload, pos)?;
        // A record straddling the cutoff must still decode before it is dropped
        if start < cutoff {
            break;
        }
        events.push(event);
        pos = start;
    }

    events.reverse();
    Ok(events)
}
