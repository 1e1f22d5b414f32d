//! Record framing for topic logs
//!
//! A log file is a plain concatenation of records with no header, footer,
//! record count or checksum. Each record is laid out as:
//!
//! ```text
//! ┌──────────────────────────┬───────────────────────────┐
//! │ payload (L bytes)        │ L as u32, big-endian (4B) │
//! └──────────────────────────┴───────────────────────────┘
//!                                                        ^ record end offset
//! ```
//!
//! The length trails the data it describes, so a record's start offset is
//! only recoverable by reading the trailer first and subtracting. This lets
//! a reader position itself at the tail of a log in O(1) and walk backward.
//!
//! This layout is a durable contract: existing logs on disk must stay
//! readable, so the trailer stays big-endian and stays after the payload.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};
use tailbus_core::{Error, Result};

/// Size of the length trailer in bytes
pub const TRAILER_SIZE: u64 = 4;

/// Largest payload a trailer can describe
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64;

/// Validate a payload length against the trailer's range
///
/// Returns the length as it will be written into the trailer.
pub fn check_payload_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Oversize { len: len as u64 })
}

/// Append one record: the payload, then its length as a big-endian u32
///
/// The length is checked before any byte is written. Payload and trailer are
/// two separate writes; a failure between them leaves a dangling tail that
/// readers report as [`Error::CorruptLog`].
pub fn append_record<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let len = check_payload_len(payload.len())?;
    writer.write_all(payload)?;
    writer.write_u32::<BigEndian>(len)?;
    Ok(())
}

/// Read the trailer of the record ending at `end`
///
/// Returns the payload length and the record's start offset.
pub fn read_trailer<R: Read + Seek>(reader: &mut R, end: u64) -> Result<(u32, u64)> {
    let trailer_at = end
        .checked_sub(TRAILER_SIZE)
        .ok_or_else(|| Error::corrupt(end, "log ends inside a length trailer"))?;

    reader.seek(SeekFrom::Start(trailer_at))?;
    let len = reader.read_u32::<BigEndian>()?;

    let start = trailer_at.checked_sub(u64::from(len)).ok_or_else(|| {
        Error::corrupt(
            end,
            format!("trailer length {} reaches before the start of the log", len),
        )
    })?;

    Ok((len, start))
}

/// Read `len` payload bytes starting at `start`
pub fn read_payload<R: Read + Seek>(reader: &mut R, start: u64, len: u32) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(start))?;
    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}
