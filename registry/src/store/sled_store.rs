//! Sled-backed [`StateStore`] backend.
//!
//! One named tree inside an embedded sled database holds every registry
//! record, keyed by the derived address bytes. sled serializes writes and
//! allows lock-free concurrent reads, so a `SledStore` can be shared
//! across threads via `Arc` without extra synchronization.

use std::path::Path;

use sled::{Db, Tree};

use super::{StateStore, StoreError};
use crate::config;
use crate::keys::Address;

/// Persistent store backed by an embedded sled database.
#[derive(Debug, Clone)]
pub struct SledStore {
    /// The underlying database handle. Kept so callers can flush.
    db: Db,
    /// The tree holding all registry records.
    records: Tree,
}

impl SledStore {
    /// Opens or creates a database at the given filesystem path.
    ///
    /// Existing records are available immediately after reopening.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path).map_err(|e| StoreError::Backend(e.to_string()))?;
        Self::from_db(db)
    }

    /// Creates a temporary database that is cleaned up on drop.
    ///
    /// Ideal for tests — no filesystem residue, no cleanup.
    pub fn open_temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, StoreError> {
        let records = db
            .open_tree(config::RECORDS_TREE)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self { db, records })
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Blocks until all pending writes are durable on disk.
    ///
    /// sled buffers writes in memory; call this after a batch of
    /// operations when durability matters more than latency.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

impl StateStore for SledStore {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        self.records
            .get(address.as_bytes())
            .map(|opt| opt.map(|ivec| ivec.to_vec()))
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn put(&self, address: &Address, value: &[u8]) -> Result<(), StoreError> {
        self.records
            .insert(address.as_bytes(), value)
            .map(|_| ())
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
