//! # In-Memory Slot Store

use super::SlotStore;
use crate::AdvisorError;
use std::collections::BTreeMap;

/// Map-backed slot store with an optional total byte quota.
///
/// The quota mirrors browser-style local storage limits: a write that would
/// push the total size of keys and values past the quota is refused with
/// `AdvisorError::QuotaExceeded` and the previous contents are kept.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that holds at most `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.slots
            .iter()
            .map(|(k, v)| k.len().saturating_add(v.len()))
            .fold(0usize, usize::saturating_add)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AdvisorError> {
        Ok(self.slots.get(key).cloned())
    }

    fn put(&mut self, key: &str, bytes: &[u8]) -> Result<(), AdvisorError> {
        if let Some(limit) = self.quota {
            let existing = self
                .slots
                .get(key)
                .map(|v| key.len().saturating_add(v.len()))
                .unwrap_or(0);
            let needed = self
                .used_bytes()
                .saturating_sub(existing)
                .saturating_add(key.len())
                .saturating_add(bytes.len());
            if needed > limit {
                return Err(AdvisorError::QuotaExceeded { needed, limit });
            }
        }
        self.slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AdvisorError> {
        self.slots.remove(key);
        Ok(())
    }
}
