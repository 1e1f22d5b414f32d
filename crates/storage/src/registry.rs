//! Topic registry
//!
//! Maps topic names to [`Topic`] handles and owns topic lifecycle:
//! creation on first use and discovery of existing logs at startup.
//!
//! # Thread Safety
//!
//! One `RwLock` orders every mutation of the name → topic map. Lookups take
//! the read side. The lock is held only for the lookup/insert; once a caller
//! holds an `Arc<Topic>`, that topic's own lock governs its I/O.
//!
//! # Topic Names
//!
//! A name is used verbatim as the log's filename inside the topics
//! directory. Names are not sanitized here: a name containing path
//! separators or `..` resolves outside that directory. Validating names is
//! the caller's responsibility.

use crate::config::StorageConfig;
use crate::topic::Topic;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tailbus_core::{Error, Result};
use tracing::{debug, info, warn};

/// Registry of all known topics
pub struct TopicRegistry {
    config: StorageConfig,
    topics: RwLock<HashMap<String, Arc<Topic>>>,
}

impl TopicRegistry {
    /// Create an empty registry without touching the filesystem
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Open the registry: create the topics directory if needed, then
    /// discover existing topic logs
    pub fn open(config: StorageConfig) -> Result<Self> {
        fs::create_dir_all(&config.topics_dir)?;
        let registry = Self::new(config);
        registry.load_existing()?;
        Ok(registry)
    }

    /// Directory holding the topic logs
    pub fn topics_dir(&self) -> &Path {
        &self.config.topics_dir
    }

    /// Register one topic per regular file in the topics directory
    ///
    /// File contents are not read; a corrupt log is only detected on its
    /// first read. Returns the number of topics newly registered.
    pub fn load_existing(&self) -> Result<usize> {
        let dir = &self.config.topics_dir;
        let mut topics = self.topics.write();
        let mut discovered = 0;

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    debug!("Skipping non-file entry {}", path.display());
                    continue;
                }
                Err(e) => {
                    warn!("Skipping unreadable entry {}: {}", path.display(), e);
                    continue;
                }
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping topic file with non UTF-8 name: {:?}", raw);
                    continue;
                }
            };

            if topics.contains_key(&name) {
                continue;
            }
            topics.insert(
                name.clone(),
                Arc::new(Topic::new(name, path, self.config.durability)),
            );
            discovered += 1;
        }

        info!("Loaded {} topics from {}", discovered, dir.display());
        Ok(discovered)
    }

    /// Return the topic named `name`, creating its log file if needed
    ///
    /// An existing file is opened, never truncated.
    pub fn get_or_create(&self, name: &str) -> Result<Arc<Topic>> {
        if let Some(topic) = self.topics.read().get(name) {
            return Ok(Arc::clone(topic));
        }

        let mut topics = self.topics.write();
        if let Some(topic) = topics.get(name) {
            return Ok(Arc::clone(topic));
        }

        let path = self.config.topics_dir.join(name);
        OpenOptions::new().create(true).append(true).open(&path)?;

        let topic = Arc::new(Topic::new(name, path, self.config.durability));
        topics.insert(name.to_string(), Arc::clone(&topic));
        debug!(topic = name, "created topic");
        Ok(topic)
    }

    /// Return the topic named `name`
    pub fn get(&self, name: &str) -> Result<Arc<Topic>> {
        self.topics
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("topic '{}'", name)))
    }

    /// Check if a topic is registered
    pub fn contains(&self, name: &str) -> bool {
        self.topics.read().contains_key(name)
    }

    /// Names of all registered topics, sorted
    pub fn topic_names(&self) -> BTreeSet<String> {
        self.topics.read().keys().cloned().collect()
    }

    /// Number of registered topics
    pub fn len(&self) -> usize {
        self.topics.read().len()
    }

    /// Check if no topics are registered
    pub fn is_empty(&self) -> bool {
        self.topics.read().is_empty()
    }
}
