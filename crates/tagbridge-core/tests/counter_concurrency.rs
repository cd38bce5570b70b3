//! Integration test: no lost updates on the usage counter.
//!
//! Two concurrent increments against a counter at 41 must land on exactly 43,
//! with each caller observing a distinct value from {42, 43}.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tagbridge_core::UsageCounter;

#[test]
fn concurrent_increments_never_lose_updates() {
    let dir = tempfile::tempdir().unwrap();
    let db = sled::open(dir.path()).unwrap();
    let counter = Arc::new(UsageCounter::open(&db, "usage").unwrap());
    counter.set("uses", 41).unwrap();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || counter.increment("uses").unwrap())
        })
        .collect();

    let observed: HashSet<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(observed, HashSet::from([42, 43]));
    assert_eq!(counter.get("uses").unwrap(), 43);
}

#[test]
fn heavy_contention_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let db = sled::open(dir.path()).unwrap();
    let counter = Arc::new(UsageCounter::open(&db, "usage").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..50 {
                    counter.increment("uses").unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(counter.get("uses").unwrap(), 400);
}
