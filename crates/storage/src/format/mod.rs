//! On-disk byte format for topic logs.
//!
//! This module centralizes all serialization logic for persistent storage.
//! Keeping the byte layout separate from operational logic (how topics lock,
//! open and scan their files) keeps the durable contract in one place.
//!
//! # Module Structure
//!
//! - `payload`: event ⇄ payload bytes
//! - `record`: payload framing with a trailing big-endian length

pub mod payload;
pub mod record;

pub use payload::{decode_event, encode_event};
pub use record::{
    append_record, check_payload_len, read_payload, read_trailer, MAX_PAYLOAD_LEN, TRAILER_SIZE,
};
