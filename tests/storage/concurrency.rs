//! Concurrent Access Tests
//!
//! Appends and reads on one topic are serialized by the topic lock; no
//! reader ever observes a torn record, and topics never leak into each
//! other.

use crate::common::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;
use tailbus_core::{Cursor, Event};

const WRITERS: usize = 8;
const PER_WRITER: usize = 100;

fn writer_event(writer: usize, seq: usize) -> Event {
    Event::new(format!("w{}", writer), seq.to_string(), base_time())
}

#[test]
fn test_concurrent_writers_lose_nothing() {
    let (_dir, registry) = temp_registry();
    let topic = registry.get_or_create("shared").unwrap();
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let topic = Arc::clone(&topic);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for seq in 0..PER_WRITER {
                    topic.append(&writer_event(w, seq)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let events = topic.read_since(Cursor::START).unwrap().events;
    assert_eq!(events.len(), WRITERS * PER_WRITER);

    // Each writer's events appear in the order it appended them
    for w in 0..WRITERS {
        let key = format!("w{}", w);
        let seqs: Vec<usize> = events
            .iter()
            .filter(|e| e.key == key)
            .map(|e| e.value.parse().unwrap())
            .collect();
        assert_eq!(seqs, (0..PER_WRITER).collect::<Vec<_>>());
    }
}

#[test]
fn test_batches_stay_contiguous_under_contention() {
    let (_dir, registry) = temp_registry();
    let topic = registry.get_or_create("batches").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|w| {
            let topic = Arc::clone(&topic);
            thread::spawn(move || {
                for round in 0..20 {
                    let batch: Vec<Event> =
                        (0..5).map(|i| writer_event(w, round * 5 + i)).collect();
                    topic.append_batch(&batch).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let events = topic.read_since(Cursor::START).unwrap().events;
    assert_eq!(events.len(), 4 * 20 * 5);
    for chunk in events.chunks(5) {
        assert!(chunk.iter().all(|e| e.key == chunk[0].key));
    }
}

#[test]
fn test_reader_chasing_writer_sees_every_event_once() {
    let (_dir, registry) = temp_registry();
    let topic = registry.get_or_create("chase").unwrap();
    let total = 500;

    let writer = {
        let topic = Arc::clone(&topic);
        thread::spawn(move || {
            for i in 0..total {
                topic.append(&numbered_event(i)).unwrap();
            }
        })
    };

    let mut cursor = Cursor::START;
    let mut seen = Vec::new();
    while seen.len() < total {
        let batch = topic.read_since(cursor).unwrap();
        seen.extend(batch.events);
        cursor = batch.cursor;
    }
    writer.join().unwrap();

    assert_eq!(seen, numbered_events(0, total));
}

#[test]
fn test_topics_are_isolated() {
    let (_dir, registry) = temp_registry();
    let registry = Arc::new(registry);
    let names = ["alpha", "beta", "gamma"];
    for name in names {
        registry.get_or_create(name).unwrap();
    }

    let handles: Vec<_> = names
        .iter()
        .map(|&name| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let topic = registry.get(name).unwrap();
                for i in 0..50 {
                    topic
                        .append(&Event::new(name, i.to_string(), base_time()))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    for name in names {
        let events = registry.get(name).unwrap().read_since(Cursor::START).unwrap().events;
        assert_eq!(events.len(), 50);
        assert!(events.iter().all(|e| e.key == name));
    }
}

#[test]
fn test_busy_topic_does_not_stall_another() {
    let (_dir, registry) = temp_registry();
    let busy = registry.get_or_create("busy").unwrap();
    let idle = registry.get_or_create("idle").unwrap();
    busy.append_batch(&numbered_events(0, 5_000)).unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let started = Arc::new(Barrier::new(2));
    let churn = {
        let busy = Arc::clone(&busy);
        let stop = Arc::clone(&stop);
        let started = Arc::clone(&started);
        thread::spawn(move || {
            started.wait();
            while !stop.load(Ordering::Relaxed) {
                busy.read_since(Cursor::START).unwrap();
                busy.append(&numbered_event(0)).unwrap();
            }
        })
    };

    started.wait();
    let (tx, rx) = mpsc::channel();
    let writer = {
        let idle = Arc::clone(&idle);
        thread::spawn(move || {
            for i in 0..20 {
                idle.append(&numbered_event(i)).unwrap();
            }
            tx.send(()).unwrap();
        })
    };

    let finished = rx.recv_timeout(Duration::from_secs(10));
    stop.store(true, Ordering::Relaxed);
    writer.join().unwrap();
    churn.join().unwrap();

    assert!(finished.is_ok(), "appends on an idle topic stalled behind a busy one");
    assert_eq!(
        idle.read_since(Cursor::START).unwrap().events,
        numbered_events(0, 20)
    );
}
