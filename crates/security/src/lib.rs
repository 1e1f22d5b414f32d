//! Access control and open options for Tailbus.
//!
//! The storage core performs no authorization of its own. This crate
//! provides the decision it relies on:
//! - [`Permission`]: capability bitmask carried by a token
//! - [`Token`]: a secret with permissions and topic subscriptions
//! - [`TokenStore`]: tokens keyed by secret hash, persisted as JSON
//! - [`AccessMode`] / [`OpenOptions`]: whether a broker accepts writes at all

pub mod permission;
pub mod store;
pub mod token;

pub use permission::Permission;
pub use store::{TokenError, TokenStore};
pub use token::{Operation, Token};

use serde::{Deserialize, Serialize};

/// Controls whether the broker allows writes or is read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    /// Topics may be created and appended to
    #[default]
    ReadWrite,
    /// Only reads and listings are permitted
    ReadOnly,
}

impl AccessMode {
    /// Check if writes (topic creation, appends) are permitted
    pub fn allows_writes(&self) -> bool {
        matches!(self, AccessMode::ReadWrite)
    }
}

/// Options for opening a broker.
///
/// ```ignore
/// use tailbus_security::{OpenOptions, AccessMode};
///
/// let opts = OpenOptions::new().access_mode(AccessMode::ReadOnly);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Write policy
    pub access_mode: AccessMode,
}

impl OpenOptions {
    /// Default options (read-write)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }
}
