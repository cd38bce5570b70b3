//! Usage accounting: one durable integer per key, shared across handlers.
//!
//! Increment goes through sled's `update_and_fetch`, which retries its
//! closure under contention; concurrent callers can never lose an update.

use sled::{Db, Tree};

/// Atomically incremented persistent counter over a sled tree.
pub struct UsageCounter {
    tree: Tree,
}

impl UsageCounter {
    /// Opens the counter namespace inside an existing store.
    pub fn open(db: &Db, namespace: &str) -> Result<Self, sled::Error> {
        Ok(Self {
            tree: db.open_tree(namespace)?,
        })
    }

    /// Adds one to the counter and returns the new value.
    pub fn increment(&self, key: &str) -> Result<u64, sled::Error> {
        let updated = self.tree.update_and_fetch(key, |old| {
            let current = old.map(decode_u64).unwrap_or(0);
            Some(current.saturating_add(1).to_be_bytes().to_vec())
        })?;
        let value = updated.as_deref().map(decode_u64).unwrap_or(0);
        tracing::debug!(key, value, "usage counter incremented");
        Ok(value)
    }

    /// Current value without incrementing; missing keys read as zero.
    pub fn get(&self, key: &str) -> Result<u64, sled::Error> {
        Ok(self.tree.get(key)?.as_deref().map(decode_u64).unwrap_or(0))
    }

    /// Overwrites the counter. External resets and test setup only.
    pub fn set(&self, key: &str, value: u64) -> Result<(), sled::Error> {
        self.tree.insert(key, value.to_be_bytes().to_vec())?;
        Ok(())
    }
}

fn decode_u64(bytes: &[u8]) -> u64 {
    bytes.try_into().map(u64::from_be_bytes).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_counter(dir: &std::path::Path) -> (Db, UsageCounter) {
        let db = sled::open(dir).unwrap();
        let counter = UsageCounter::open(&db, "usage").unwrap();
        (db, counter)
    }

    #[test]
    fn increments_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, counter) = open_counter(dir.path());
        assert_eq!(counter.get("uses").unwrap(), 0);
        assert_eq!(counter.increment("uses").unwrap(), 1);
        assert_eq!(counter.increment("uses").unwrap(), 2);
        assert_eq!(counter.get("uses").unwrap(), 2);
    }

    #[test]
    fn set_then_increment() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, counter) = open_counter(dir.path());
        counter.set("uses", 41).unwrap();
        assert_eq!(counter.increment("uses").unwrap(), 42);
    }

    #[test]
    fn keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, counter) = open_counter(dir.path());
        counter.increment("a").unwrap();
        assert_eq!(counter.get("b").unwrap(), 0);
    }

    #[test]
    fn garbage_bytes_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let (_db, counter) = open_counter(dir.path());
        counter.tree.insert("uses", b"junk".to_vec()).unwrap();
        assert_eq!(counter.get("uses").unwrap(), 0);
        assert_eq!(counter.increment("uses").unwrap(), 1);
    }
}
