//! Broker Integration Tests
//!
//! Tests for the tailbus facade: topic lifecycle, token-checked sessions,
//! the token store and durability/access options.

#[path = "../common/mod.rs"]
mod common;

mod options;
