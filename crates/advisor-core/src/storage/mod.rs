//! # Storage Module
//!
//! Local key-value stores that hold persisted session records.
//!
//! The persistence adapter only needs three calls (`get`, `put`, `remove`),
//! captured by [`SlotStore`]. Backends:
//! - `MemoryStore`: map-backed, optional byte quota (fast, volatile)
//! - `RedbStore`: redb database file (ACID, persistent)
//! - `StorageBackend::Unavailable`: storage disabled, every call fails

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::AdvisorError;
use std::path::Path;

/// A string-keyed byte store.
pub trait SlotStore {
    /// Read a slot. `Ok(None)` if the slot is empty.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AdvisorError>;

    /// Write a slot, replacing any previous contents.
    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), AdvisorError>;

    /// Remove a slot. Removing an empty slot is not an error.
    fn remove(&mut self, key: &str) -> Result<(), AdvisorError>;
}

/// Storage backend for the persistence adapter.
#[derive(Debug)]
pub enum StorageBackend {
    /// Map-backed store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
    /// Storage is disabled or could not be opened.
    Unavailable,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

impl StorageBackend {
    /// Open a redb store at `path`, degrading to `Unavailable` on failure.
    ///
    /// The quiz must stay usable when the local store cannot be opened, so
    /// the failure is logged rather than returned.
    pub fn open_or_unavailable(path: impl AsRef<Path>) -> Self {
        match RedbStore::open(path.as_ref()) {
            Ok(store) => Self::Persistent(store),
            Err(e) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %e,
                    "local store unavailable, session will not survive a restart"
                );
                Self::Unavailable
            }
        }
    }

    /// Short backend name for status output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "memory",
            Self::Persistent(_) => "redb",
            Self::Unavailable => "unavailable",
        }
    }

    /// True when writes survive the process.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }
}

impl SlotStore for StorageBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AdvisorError> {
        match self {
            Self::InMemory(store) => store.get(key),
            Self::Persistent(store) => store.get(key),
            Self::Unavailable => Err(AdvisorError::StorageUnavailable),
        }
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), AdvisorError> {
        match self {
            Self::InMemory(store) => store.put(key, bytes),
            Self::Persistent(store) => store.put(key, bytes),
            Self::Unavailable => Err(AdvisorError::StorageUnavailable),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), AdvisorError> {
        match self {
            Self::InMemory(store) => store.remove(key),
            Self::Persistent(store) => store.remove(key),
            Self::Unavailable => Err(AdvisorError::StorageUnavailable),
        }
    }
}
