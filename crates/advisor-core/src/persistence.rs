//! # Persistence Adapter
//!
//! Saves the in-progress session to a single fixed slot of a local store so a
//! reload can resume it.
//!
//! Two layers:
//! - `try_save` / `try_load` / `try_clear` return `Result` and surface every
//!   store and format failure.
//! - `save` / `load` / `clear` are what the engine calls. They log failures
//!   with `tracing::warn!` and degrade to a no-op, so an unavailable, full or
//!   corrupted store never interrupts a quiz.
//!
//! A session that reached the results step is never resumed.

use crate::formats::{session_from_bytes, session_to_bytes};
use crate::primitives::SESSION_SLOT;
use crate::storage::{SlotStore, StorageBackend};
use crate::{AdvisorError, Catalog, Session};

// =============================================================================
// ERROR LOGGING HELPERS
// =============================================================================

/// Log a storage error and convert Result to Option.
#[inline]
fn log_and_convert<T>(result: Result<T, AdvisorError>, context: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(operation = context, error = %e, "session storage degraded");
            None
        }
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Persistence adapter over a [`StorageBackend`].
#[derive(Debug, Default)]
pub struct SessionStore {
    backend: StorageBackend,
}

impl SessionStore {
    /// Create an adapter over `backend`.
    #[must_use]
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }

    /// Adapter over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    // =========================================================================
    // FALLIBLE LAYER
    // =========================================================================

    /// Serialize `session` into the slot.
    pub fn try_save(&mut self, session: &Session) -> Result<(), AdvisorError> {
        let bytes = session_to_bytes(session)?;
        self.backend.put(SESSION_SLOT, &bytes)
    }

    /// Read whatever session the slot holds, complete or not.
    pub fn try_read(&self) -> Result<Option<Session>, AdvisorError> {
        match self.backend.get(SESSION_SLOT)? {
            Some(bytes) => session_from_bytes(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Read the slot and keep the session only if it is resumable.
    pub fn try_load(&self, catalog: &Catalog) -> Result<Option<Session>, AdvisorError> {
        Ok(self
            .try_read()?
            .filter(|session| session.is_resumable(catalog)))
    }

    /// Remove the slot.
    pub fn try_clear(&mut self) -> Result<(), AdvisorError> {
        self.backend.remove(SESSION_SLOT)
    }

    // =========================================================================
    // DEGRADING LAYER
    // =========================================================================

    /// Save, logging and swallowing any failure. Returns true on success.
    pub fn save(&mut self, session: &Session) -> bool {
        log_and_convert(self.try_save(session), "save").is_some()
    }

    /// Load a resumable session, or `None` on absence, completion or failure.
    pub fn load(&self, catalog: &Catalog) -> Option<Session> {
        log_and_convert(self.try_load(catalog), "load").flatten()
    }

    /// Clear, logging and swallowing any failure. Returns true on success.
    pub fn clear(&mut self) -> bool {
        log_and_convert(self.try_clear(), "clear").is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
