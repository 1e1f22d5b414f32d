//! Read cursor for incremental topic reads
//!
//! A cursor is a byte offset into a topic log. It is opaque to consumers:
//! the only valid values are [`Cursor::START`] and cursors previously
//! returned by a read. Arbitrary offsets are not guaranteed to land on a
//! record boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Byte-offset token marking how far a consumer has read
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cursor(u64);

impl Cursor {
    /// Cursor requesting the whole log from the beginning
    pub const START: Cursor = Cursor(0);

    /// Wrap a raw offset
    pub const fn new(offset: u64) -> Self {
        Cursor(offset)
    }

    /// Raw byte offset
    pub const fn offset(self) -> u64 {
        self.0
    }

    /// Whether this cursor requests the full log
    pub const fn is_start(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Cursor {
    fn from(offset: u64) -> Self {
        Cursor(offset)
    }
}

impl From<Cursor> for u64 {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Cursor)
    }
}
