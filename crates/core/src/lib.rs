//! Core types for Tailbus
//!
//! This crate defines the types shared by every layer of the broker:
//! - [`Event`]: the key/value record producers append and consumers read
//! - [`Cursor`]: the opaque byte-offset token that drives incremental reads
//! - [`Error`]: the error taxonomy reported by storage operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod error;
pub mod event;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use event::Event;
