//! In-memory key-value store.
//!
//! # Responsibility
//! - Implement the store contract over shared process memory.
//! - Let tests and the CLI probe open sibling contexts on the same data,
//!   simulating multiple tabs bound to one origin.
//!
//! # Invariants
//! - Sibling handles observe each other's writes through the shared bus,
//!   never their own.
//! - Notifications fire only when stored state actually changed.

use crate::store::change::{ChangeBus, OriginId, StoreChange};
use crate::store::{KeyValueStore, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

type SharedEntries = Arc<Mutex<BTreeMap<String, String>>>;

/// Volatile store backed by a map shared across sibling contexts.
pub struct MemoryNoteStore {
    origin: OriginId,
    entries: SharedEntries,
    bus: ChangeBus,
}

impl MemoryNoteStore {
    /// Opens a fresh, empty store with its own change bus.
    pub fn new() -> Self {
        Self {
            origin: Uuid::new_v4(),
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            bus: ChangeBus::new(),
        }
    }

    /// Opens another context over the same data, as another tab would.
    ///
    /// The sibling gets its own origin, so the two handles observe each
    /// other's changes but never echo their own.
    pub fn open_sibling(&self) -> Self {
        Self {
            origin: Uuid::new_v4(),
            entries: Arc::clone(&self.entries),
            bus: self.bus.clone(),
        }
    }

    /// Identity of this context on the shared bus.
    pub fn origin(&self) -> OriginId {
        self.origin
    }

    /// Subscribes this context to changes made by its siblings.
    pub fn changes(&self) -> Receiver<StoreChange> {
        self.bus.subscribe(self.origin)
    }

    fn lock_entries(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Poisoned("note entries"))
    }
}

impl Default for MemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryNoteStore {
    fn enumerate(&self) -> StoreResult<Vec<(String, String)>> {
        let entries = self.lock_entries()?;
        Ok(entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.lock_entries()?;
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let changed = {
            let mut entries = self.lock_entries()?;
            let previous = entries.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        };
        if changed {
            self.bus.publish(self.origin, &StoreChange::set(key, value));
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let existed = {
            let mut entries = self.lock_entries()?;
            entries.remove(key).is_some()
        };
        if existed {
            self.bus.publish(self.origin, &StoreChange::removal(key));
        }
        Ok(())
    }
}
