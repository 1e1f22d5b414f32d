//! Startup Discovery Tests
//!
//! A registry reopened over an existing directory finds every topic file
//! and reads its history without rewriting it.

use crate::common::*;
use std::fs;
use tailbus_core::Cursor;
use tailbus_storage::{StorageConfig, TopicRegistry};

#[test]
fn test_reopen_discovers_topics_and_history() {
    let (dir, registry) = temp_registry();
    registry.get_or_create("a").unwrap().append_batch(&numbered_events(0, 3)).unwrap();
    registry.get_or_create("b").unwrap();
    drop(registry);

    let reopened = TopicRegistry::open(StorageConfig::new(dir.path())).unwrap();
    assert_eq!(
        reopened.topic_names().into_iter().collect::<Vec<_>>(),
        vec!["a".to_string(), "b".to_string()]
    );
    assert_eq!(
        reopened.get("a").unwrap().read_since(Cursor::START).unwrap().events,
        numbered_events(0, 3)
    );
    assert!(reopened.get("b").unwrap().read_since(Cursor::START).unwrap().is_empty());
}

#[test]
fn test_get_or_create_keeps_existing_history() {
    let (dir, registry) = temp_registry();
    registry.get_or_create("t").unwrap().append(&numbered_event(0)).unwrap();
    drop(registry);

    let reopened = TopicRegistry::new(StorageConfig::new(dir.path()));
    let topic = reopened.get_or_create("t").unwrap();
    assert_eq!(topic.read_since(Cursor::START).unwrap().events, vec![numbered_event(0)]);
}

#[test]
fn test_cursor_survives_restart() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append_batch(&numbered_events(0, 2)).unwrap();
    let cursor = topic.read_since(Cursor::START).unwrap().cursor;
    drop(topic);
    drop(registry);

    let reopened = TopicRegistry::open(StorageConfig::new(dir.path())).unwrap();
    let topic = reopened.get("t").unwrap();
    topic.append(&numbered_event(2)).unwrap();

    assert_eq!(topic.read_since(cursor).unwrap().events, vec![numbered_event(2)]);
}

#[test]
fn test_subdirectories_are_not_topics() {
    let (dir, registry) = temp_registry();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("plain"), b"").unwrap();

    assert_eq!(registry.load_existing().unwrap(), 1);
    assert!(registry.contains("plain"));
    assert!(!registry.contains("nested"));
}

#[test]
fn test_load_existing_is_idempotent() {
    let (dir, registry) = temp_registry();
    fs::write(dir.path().join("x"), b"").unwrap();

    assert_eq!(registry.load_existing().unwrap(), 1);
    assert_eq!(registry.load_existing().unwrap(), 0);
    assert_eq!(registry.len(), 1);
}
