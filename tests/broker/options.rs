//! Open Options Tests
//!
//! Durability mode and access mode as configured through the builder.

use crate::common::*;
use tailbus::{AccessMode, Broker, Cursor, DurabilityMode, OpenOptions};
use tempfile::TempDir;

#[test]
fn test_strict_mode_reads_back() {
    let dir = TempDir::new().unwrap();
    let broker = Broker::builder().path(dir.path()).strict().open().unwrap();
    broker.create_topic("t").unwrap();

    broker.append("t", &numbered_event(0)).unwrap();

    assert_eq!(
        broker.registry().get("t").unwrap().read_since(Cursor::START).unwrap().events,
        vec![numbered_event(0)]
    );
}

#[test]
fn test_explicit_durability() {
    let dir = TempDir::new().unwrap();
    let broker = Broker::builder()
        .path(dir.path())
        .durability(DurabilityMode::Strict)
        .buffered()
        .open()
        .unwrap();

    broker.create_topic("t").unwrap();
    broker.push("t", [("k", "v")]).unwrap();
    assert_eq!(broker.read_since("t", Cursor::START).unwrap().len(), 1);
}

#[test]
fn test_read_only_broker_reads_but_never_writes() {
    let (dir, broker) = temp_broker();
    broker.create_topic("t").unwrap();
    broker.append("t", &numbered_event(0)).unwrap();
    drop(broker);

    let broker = Broker::builder()
        .path(dir.path())
        .open_options(OpenOptions::new().access_mode(AccessMode::ReadOnly))
        .open()
        .unwrap();
    assert_eq!(broker.access_mode(), AccessMode::ReadOnly);

    assert!(broker.create_topic("u").unwrap_err().is_permission_denied());
    assert!(broker.push("t", [("k", "v")]).unwrap_err().is_permission_denied());
    assert!(!dir.path().join("u").exists());
    assert_eq!(
        broker.read_since("t", Cursor::START).unwrap().events,
        vec![numbered_event(0)]
    );
}

#[test]
fn test_builder_path_creates_directory() {
    let dir = TempDir::new().unwrap();
    let topics = dir.path().join("data").join("topics");

    let broker = Broker::builder().path(&topics).open().unwrap();
    assert!(topics.is_dir());
    assert_eq!(broker.path(), topics.as_path());
}
