//! Main broker entry point for Tailbus.
//!
//! This module provides the `Broker` struct, the surface a serving layer
//! calls into: topic creation, appends, incremental reads and listing.

use crate::session::Session;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tailbus_core::{Cursor, Error, Event, Result};
use tailbus_security::{AccessMode, OpenOptions, Token};
use tailbus_storage::{DurabilityMode, ReadBatch, StorageConfig, TopicRegistry};
use tempfile::TempDir;
use tracing::info;

/// The Tailbus broker.
///
/// Owns the topic registry for one topics directory. Build one at startup
/// and hand it to request handlers by reference (or inside an `Arc`).
///
/// # Example
///
/// ```ignore
/// use tailbus::prelude::*;
///
/// let broker = Broker::open("./topics")?;
/// broker.create_topic("orders")?;
/// broker.append("orders", &Event::now("order", "42"))?;
///
/// let batch = broker.read_since("orders", Cursor::START)?;
/// let next = broker.read_since("orders", batch.cursor)?;
/// ```
pub struct Broker {
    registry: Arc<TopicRegistry>,
    access_mode: AccessMode,
    /// Keeps a temporary topics directory alive for the broker's lifetime
    _temp_dir: Option<TempDir>,
}

impl Broker {
    /// Open a broker over the topics directory at `path`.
    ///
    /// Uses default settings (buffered durability, read-write). Existing
    /// topic files in the directory are registered without being read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a builder for broker configuration.
    pub fn builder() -> BrokerBuilder {
        BrokerBuilder::new()
    }

    /// Create a topic, or do nothing if it already exists.
    pub fn create_topic(&self, name: &str) -> Result<()> {
        self.ensure_writable()?;
        self.registry.get_or_create(name)?;
        Ok(())
    }

    /// Append one event to an existing topic.
    pub fn append(&self, topic: &str, event: &Event) -> Result<()> {
        self.ensure_writable()?;
        self.registry.get(topic)?.append(event)
    }

    /// Append one event per key/value pair, all stamped with the current time.
    ///
    /// The pairs land contiguously and in order. Returns the number of events
    /// appended.
    pub fn push<K, V>(&self, topic: &str, pairs: impl IntoIterator<Item = (K, V)>) -> Result<usize>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.ensure_writable()?;
        let topic = self.registry.get(topic)?;
        let events: Vec<Event> = pairs
            .into_iter()
            .map(|(k, v)| Event::now(k, v))
            .collect();
        topic.append_batch(&events)?;
        Ok(events.len())
    }

    /// Read every event appended to `topic` after `cursor`.
    pub fn read_since(&self, topic: &str, cursor: Cursor) -> Result<ReadBatch> {
        self.registry.get(topic)?.read_since(cursor)
    }

    /// Names of all known topics.
    pub fn list_topics(&self) -> BTreeSet<String> {
        self.registry.topic_names()
    }

    /// Size of a topic's log in bytes.
    pub fn topic_size(&self, topic: &str) -> Result<u64> {
        self.registry.get(topic)?.len_bytes()
    }

    /// Bind a token to this broker; every call through the session is
    /// checked against the token first.
    pub fn session<'a>(&'a self, token: &'a Token) -> Session<'a> {
        Session::new(self, token)
    }

    /// Get the topics directory path.
    pub fn path(&self) -> &Path {
        self.registry.topics_dir()
    }

    /// Get the access mode the broker was opened with.
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    /// Shared handle to the underlying registry.
    pub fn registry(&self) -> Arc<TopicRegistry> {
        Arc::clone(&self.registry)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.access_mode.allows_writes() {
            Ok(())
        } else {
            Err(Error::PermissionDenied("broker is read-only".into()))
        }
    }
}

/// Builder for broker configuration.
///
/// # Example
///
/// ```ignore
/// // Production: fsync every append
/// let broker = Broker::builder()
///     .path("./topics")
///     .strict()
///     .open()?;
///
/// // Inspection: no topic creation or appends
/// let broker = Broker::builder()
///     .path("./topics")
///     .read_only()
///     .open()?;
///
/// // Testing: temporary directory removed on drop
/// let broker = Broker::builder().open_temp()?;
/// ```
pub struct BrokerBuilder {
    path: Option<PathBuf>,
    durability: DurabilityMode,
    options: OpenOptions,
}

impl BrokerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            path: None,
            durability: DurabilityMode::default(),
            options: OpenOptions::new(),
        }
    }

    /// Set the topics directory path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use buffered mode (default): the OS decides when appends hit disk.
    pub fn buffered(mut self) -> Self {
        self.durability = DurabilityMode::Buffered;
        self
    }

    /// Use strict mode: fsync after every append.
    pub fn strict(mut self) -> Self {
        self.durability = DurabilityMode::Strict;
        self
    }

    /// Set the durability mode explicitly.
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    /// Reject topic creation and appends.
    pub fn read_only(mut self) -> Self {
        self.options = self.options.access_mode(AccessMode::ReadOnly);
        self
    }

    /// Replace the open options.
    pub fn open_options(mut self, options: OpenOptions) -> Self {
        self.options = options;
        self
    }

    /// Open the broker.
    ///
    /// Uses the configured path, or a temp directory if none set.
    pub fn open(self) -> Result<Broker> {
        match self.path.clone() {
            Some(path) => self.open_at(path, None),
            None => self.open_temp(),
        }
    }

    /// Open a broker over a fresh temporary directory.
    ///
    /// The directory is deleted when the broker is dropped.
    pub fn open_temp(self) -> Result<Broker> {
        let temp = TempDir::new()?;
        let path = temp.path().to_path_buf();
        self.open_at(path, Some(temp))
    }

    fn open_at(self, path: PathBuf, temp: Option<TempDir>) -> Result<Broker> {
        let config = StorageConfig::new(&path).durability(self.durability);
        let registry = TopicRegistry::open(config)?;
        info!(
            "Opened broker at {} ({}, {:?})",
            path.display(),
            self.durability.description(),
            self.options.access_mode
        );
        Ok(Broker {
            registry: Arc::new(registry),
            access_mode: self.options.access_mode,
            _temp_dir: temp,
        })
    }
}

impl Default for BrokerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
