//! In-memory [`StateStore`] backend.
//!
//! A `HashMap` behind a `parking_lot::RwLock`. Used by the test suites and
//! anywhere an ephemeral registry is good enough. Reads don't block reads;
//! each `get`/`put` is atomic under the lock.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{StateStore, StoreError};
use crate::keys::Address;

/// Ephemeral store backed by process memory.
///
/// Cloning is intentionally not provided — share one instance via `Arc`
/// so that every registry sees the same records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Address, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held. Test convenience.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.read().get(address).cloned())
    }

    fn put(&self, address: &Address, value: &[u8]) -> Result<(), StoreError> {
        self.records
            .write()
            .insert(address.clone(), value.to_vec());
        Ok(())
    }
}
