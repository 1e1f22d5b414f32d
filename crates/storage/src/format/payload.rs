//! Event payload encoding
//!
//! A payload is the bincode encoding of an [`Event`] using fixed-width
//! integers in big-endian order. Trailing bytes are rejected, so a payload
//! decodes to exactly one event or fails.

use bincode::Options;
use std::io;
use tailbus_core::{Error, Event, Result};

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_big_endian()
        .reject_trailing_bytes()
}

/// Serialize an event into payload bytes
pub fn encode_event(event: &Event) -> Result<Vec<u8>> {
    codec()
        .serialize(event)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))
}

/// Deserialize payload bytes into an event
///
/// `end` is the end offset of the record the payload came from; it is only
/// used to locate the failure in the returned [`Error::CorruptLog`].
pub fn decode_event(payload: &[u8], end: u64) -> Result<Event> {
    codec()
        .deserialize(payload)
        .map_err(|e| Error::corrupt(end, format!("undecodable payload: {}", e)))
}
