//! Corruption Detection Tests
//!
//! A damaged log must surface as CorruptLog and yield no events, never a
//! panic or a partial batch.

use crate::common::*;
use tailbus_core::{Cursor, Error};
use tailbus_storage::format::encode_event;

fn trailer(len: u32) -> [u8; 4] {
    len.to_be_bytes()
}

fn assert_corrupt(result: tailbus_core::Result<tailbus_storage::ReadBatch>) {
    match result {
        Err(Error::CorruptLog { .. }) => {}
        other => panic!("expected CorruptLog, got {:?}", other),
    }
}

#[test]
fn test_log_shorter_than_trailer() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    append_raw(&dir.path().join("t"), &[0x00, 0x01]);

    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_trailer_claims_more_than_file() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append(&numbered_event(0)).unwrap();
    append_raw(&dir.path().join("t"), &trailer(1 << 30));

    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_undecodable_payload() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append(&numbered_event(0)).unwrap();

    let garbage = [0xFFu8; 12];
    let path = dir.path().join("t");
    append_raw(&path, &garbage);
    append_raw(&path, &trailer(garbage.len() as u32));

    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_corruption_before_cursor_is_not_read() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    let path = dir.path().join("t");
    append_raw(&path, &[0xAB; 8]);
    append_raw(&path, &trailer(8));

    let cursor = Cursor::new(topic.len_bytes().unwrap());
    topic.append(&numbered_event(1)).unwrap();

    let batch = topic.read_since(cursor).unwrap();
    assert_eq!(batch.events, vec![numbered_event(1)]);
    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_payload_without_trailer_is_corrupt() {
    // A crash between the payload write and the trailer write leaves a
    // payload with no length after it. The next read misreads the payload's
    // last bytes as a trailer and must report corruption.
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append(&numbered_event(0)).unwrap();

    let dangling = encode_event(&numbered_event(0)).unwrap();
    append_raw(&dir.path().join("t"), &dangling);

    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_truncated_record_after_good_ones() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append_batch(&numbered_events(0, 5)).unwrap();

    let path = dir.path().join("t");
    let len = std::fs::metadata(&path).unwrap().len();
    let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(len - 1).unwrap();

    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_torn_tail_after_cursor_is_corrupt() {
    let (dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append(&numbered_event(0)).unwrap();
    let cursor = topic.read_since(Cursor::START).unwrap().cursor;

    // Four stray bytes plus a length reaching back to offset 0
    let path = dir.path().join("t");
    append_raw(&path, &[0xAB; 4]);
    append_raw(&path, &trailer(cursor.offset() as u32 + 4));

    assert_corrupt(topic.read_since(cursor));
    assert_corrupt(topic.read_since(Cursor::START));
}

#[test]
fn test_straddling_record_that_decodes_is_excluded() {
    let (_dir, registry) = temp_registry();
    let topic = registry.get_or_create("t").unwrap();
    topic.append(&numbered_event(0)).unwrap();
    let boundary = topic.len_bytes().unwrap();
    topic.append(&numbered_event(1)).unwrap();

    let batch = topic.read_since(Cursor::new(boundary + 1)).unwrap();
    assert!(batch.is_empty());
    assert_eq!(batch.cursor.offset(), topic.len_bytes().unwrap());
}
