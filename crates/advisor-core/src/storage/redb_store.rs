//! # redb-backed Slot Store
//!
//! A disk-backed slot store using the redb embedded database.
//!
//! redb provides:
//! - ACID transactions
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration
//!
//! All slots live in a single table keyed by slot name.

use super::SlotStore;
use crate::AdvisorError;
use redb::{Database, ReadableDatabase, ReadableTableMetadata, TableDefinition};
use std::path::{Path, PathBuf};

/// Table for slots: slot name -> record bytes
const SLOTS: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");

fn io_err(e: impl std::fmt::Display) -> AdvisorError {
    AdvisorError::IoError(e.to_string())
}

/// A disk-backed slot store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
    /// Where the database lives, for diagnostics.
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AdvisorError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Initialize the table so read transactions never see it missing.
        {
            let write_txn = db.begin_write().map_err(io_err)?;
            let _ = write_txn.open_table(SLOTS).map_err(io_err)?;
            write_txn.commit().map_err(io_err)?;
        }

        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of occupied slots.
    pub fn len(&self) -> Result<u64, AdvisorError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(SLOTS).map_err(io_err)?;
        table.len().map_err(io_err)
    }

    pub fn is_empty(&self) -> Result<bool, AdvisorError> {
        Ok(self.len()? == 0)
    }
}

impl SlotStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AdvisorError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(SLOTS).map_err(io_err)?;
        let value = table
            .get(key)
            .map_err(io_err)?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), AdvisorError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(SLOTS).map_err(io_err)?;
            table.insert(key, bytes).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), AdvisorError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(SLOTS).map_err(io_err)?;
            table.remove(key).map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)
    }
}

// =============================================================================
// TESTS
// =============================================================================
