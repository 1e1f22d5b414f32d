//! Storage configuration

use crate::durability::DurabilityMode;
use std::path::{Path, PathBuf};

/// Where topic logs live and how appends are made durable
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one log file per topic
    pub topics_dir: PathBuf,
    /// Sync policy for appends
    pub durability: DurabilityMode,
}

impl StorageConfig {
    /// Config for `topics_dir` with the default durability mode
    pub fn new(topics_dir: impl AsRef<Path>) -> Self {
        Self {
            topics_dir: topics_dir.as_ref().to_path_buf(),
            durability: DurabilityMode::default(),
        }
    }

    /// Set the durability mode
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }
}
