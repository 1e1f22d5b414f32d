//! Event type exchanged with producers and consumers
//!
//! An event is a single key/value pair stamped with the instant it was
//! produced. Events are immutable once appended to a topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event in a topic log
///
/// The JSON form is `{"key": .., "value": .., "timestamp": ..}` with the
/// timestamp rendered as RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event key (producer-defined)
    pub key: String,
    /// Event value (producer-defined)
    pub value: String,
    /// Instant the event was produced
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Create an event with an explicit timestamp
    pub fn new(key: impl Into<String>, value: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            timestamp,
        }
    }

    /// Create an event stamped with the current time
    pub fn now(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, value, Utc::now())
    }
}
