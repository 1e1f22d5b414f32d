//! Topic storage engine for Tailbus
//!
//! This crate implements the index-free, tail-anchored topic log:
//! - format: record framing (payload + trailing big-endian length) and event codec
//! - Topic: one log file behind one exclusive lock, with append and backward-scan reads
//! - TopicRegistry: name → topic map, topic creation and startup discovery
//! - DurabilityMode: whether appends are synced before returning

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod durability;
pub mod format;
pub mod registry;
pub mod topic;

pub use config::StorageConfig;
pub use durability::DurabilityMode;
pub use registry::TopicRegistry;
pub use topic::{ReadBatch, Topic};
