//! Token-bound access to a broker.
//!
//! A `Session` makes the access decision for every call before the storage
//! core is invoked. A denied call never reaches a topic.

use crate::broker::Broker;
use std::collections::BTreeSet;
use tailbus_core::{Cursor, Error, Event, Result};
use tailbus_security::{Operation, Token};
use tailbus_storage::ReadBatch;

/// A broker seen through one token's permissions.
pub struct Session<'a> {
    broker: &'a Broker,
    token: &'a Token,
}

impl<'a> Session<'a> {
    pub(crate) fn new(broker: &'a Broker, token: &'a Token) -> Self {
        Self { broker, token }
    }

    /// The token this session acts for.
    pub fn token(&self) -> &Token {
        self.token
    }

    /// Create a topic; requires `createTopic`.
    pub fn create_topic(&self, name: &str) -> Result<()> {
        self.authorize(Operation::CreateTopic, Some(name))?;
        self.broker.create_topic(name)
    }

    /// Append an event; requires `write` and a subscription to `topic`.
    pub fn append(&self, topic: &str, event: &Event) -> Result<()> {
        self.authorize(Operation::Write, Some(topic))?;
        self.broker.append(topic, event)
    }

    /// Append key/value pairs; requires `write` and a subscription to `topic`.
    pub fn push<K, V>(&self, topic: &str, pairs: impl IntoIterator<Item = (K, V)>) -> Result<usize>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.authorize(Operation::Write, Some(topic))?;
        self.broker.push(topic, pairs)
    }

    /// Read since `cursor`; requires `read` and a subscription to `topic`.
    pub fn read_since(&self, topic: &str, cursor: Cursor) -> Result<ReadBatch> {
        self.authorize(Operation::Read, Some(topic))?;
        self.broker.read_since(topic, cursor)
    }

    /// List all topics; requires the admin flag.
    pub fn list_topics(&self) -> Result<BTreeSet<String>> {
        self.authorize(Operation::ListTopics, None)?;
        Ok(self.broker.list_topics())
    }

    /// Size of a topic's log in bytes; requires `read` and a subscription.
    pub fn topic_size(&self, topic: &str) -> Result<u64> {
        self.authorize(Operation::Read, Some(topic))?;
        self.broker.topic_size(topic)
    }

    /// Check `op` against the token without performing it.
    ///
    /// Used by callers that act on state outside the broker, such as the
    /// token store.
    pub fn authorize(&self, op: Operation, topic: Option<&str>) -> Result<()> {
        if self.token.allows(op, topic) {
            return Ok(());
        }
        Err(Error::PermissionDenied(match topic {
            Some(t) => format!("{:?} on topic '{}'", op, t),
            None => format!("{:?}", op),
        }))
    }
}
