//! In-memory stand-ins for the browser: a key-value store, a class list
//! and a manually driven timer registry.
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use thiserror::Error;

use crate::accessibility::{ClassList, PreferenceStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("memory store read refused")]
    ReadRefused,
    #[error("memory store write refused")]
    WriteRefused,
}

/// Shared in-memory `PreferenceStore`. Clones see the same entries, which
/// lets a test "reload" by building a second controller over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PreferenceStore for MemoryStore {
    type Error = MemoryStoreError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        if self.fail_reads.get() {
            return Err(MemoryStoreError::ReadRefused);
        }
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.fail_writes.get() {
            return Err(MemoryStoreError::WriteRefused);
        }
        self.insert(key, value);
        Ok(())
    }
}

/// Class list backed by an ordered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet(BTreeSet<String>);

impl ClassSet {
    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        Self(classes.into_iter().map(str::to_string).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl ClassList for ClassSet {
    fn add(&mut self, class: &str) {
        self.0.insert(class.to_string());
    }

    fn remove(&mut self, class: &str) {
        self.0.remove(class);
    }

    fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }
}

/// Registry of fake repeating timers.
///
/// Each handle deregisters itself when dropped. A simulated period elapsing
/// fires every registered timer once, so `live()` is also the number of
/// callbacks one period would deliver.
#[derive(Debug, Clone, Default)]
pub struct FakeTimers {
    live: Rc<RefCell<BTreeSet<u64>>>,
    next_id: Rc<Cell<u64>>,
    started: Rc<Cell<usize>>,
}

#[derive(Debug)]
pub struct FakeTimer {
    id: u64,
    period_ms: u32,
    live: Rc<RefCell<BTreeSet<u64>>>,
}

impl FakeTimer {
    #[must_use]
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

impl Drop for FakeTimer {
    fn drop(&mut self) {
        self.live.borrow_mut().remove(&self.id);
    }
}

impl FakeTimers {
    /// Spawn function suitable for `SliderController::start_auto_advance`.
    pub fn spawner(&self) -> impl FnOnce(u32) -> FakeTimer + use<> {
        let timers = self.clone();
        move |period_ms| timers.start(period_ms)
    }

    pub fn start(&self, period_ms: u32) -> FakeTimer {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.started.set(self.started.get() + 1);
        self.live.borrow_mut().insert(id);
        FakeTimer {
            id,
            period_ms,
            live: self.live.clone(),
        }
    }

    #[must_use]
    pub fn live(&self) -> usize {
        self.live.borrow().len()
    }

    /// Total timers ever started.
    #[must_use]
    pub fn started(&self) -> usize {
        self.started.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.write("k", "v").unwrap();
        assert_eq!(other.read("k").unwrap().as_deref(), Some("v"));
        other.clear();
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn memory_store_can_refuse() {
        let store = MemoryStore::default();
        store.fail_writes(true);
        assert_eq!(store.write("k", "v"), Err(MemoryStoreError::WriteRefused));
        store.fail_reads(true);
        assert_eq!(store.read("k"), Err(MemoryStoreError::ReadRefused));
    }

    #[test]
    fn fake_timers_deregister_on_drop() {
        let timers = FakeTimers::default();
        let a = timers.start(10);
        let b = (timers.spawner())(20);
        assert_eq!(timers.live(), 2);
        assert_eq!(b.period_ms(), 20);
        drop(a);
        assert_eq!(timers.live(), 1);
        drop(b);
        assert_eq!(timers.live(), 0);
        assert_eq!(timers.started(), 2);
    }
}
