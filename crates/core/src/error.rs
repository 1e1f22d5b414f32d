//! Error types for Tailbus
//!
//! Every storage operation either fully succeeds or reports one of these
//! errors to its caller. Nothing in the core retries. Mapping these kinds to
//! an external protocol is the serving layer's job; [`Error::code`] gives a
//! stable string for that purpose.

use thiserror::Error;

/// All Tailbus errors
#[derive(Debug, Error)]
pub enum Error {
    /// Topic or its log file does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Open, read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A trailer references an out-of-bounds record, or a payload fails to decode
    #[error("corrupt log at offset {offset}: {reason}")]
    CorruptLog {
        /// End offset of the record being decoded
        offset: u64,
        /// What was wrong with it
        reason: String,
    },

    /// Payload does not fit in a 4-byte length trailer
    #[error("payload of {len} bytes exceeds the 4-byte length trailer")]
    Oversize {
        /// Encoded payload length
        len: u64,
    },
}

/// Result type for Tailbus operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::CorruptLog`]
    pub fn corrupt(offset: u64, reason: impl Into<String>) -> Self {
        Error::CorruptLog {
            offset,
            reason: reason.into(),
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a corrupt-log error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::CorruptLog { .. })
    }

    /// Check if this is a permission error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied(_))
    }

    /// Canonical error code
    ///
    /// These codes are stable; serving layers may match on them.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NotFound",
            Error::PermissionDenied(_) => "PermissionDenied",
            Error::Io(_) => "IOError",
            Error::CorruptLog { .. } => "CorruptLog",
            Error::Oversize { .. } => "Oversize",
        }
    }
}
