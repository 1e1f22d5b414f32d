//! Storage Crate Integration Tests
//!
//! Tests for tailbus-storage: cursor semantics, corruption detection,
//! concurrent access and startup discovery.

#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod corruption;
mod discovery;
