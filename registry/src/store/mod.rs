//! # Store Module — The Key-Value Collaborator
//!
//! Durable persistence is not the engine's problem. Everything the engine
//! knows about storage fits in the [`StateStore`] trait: `get` an address
//! (absence is `None`, never an error) and `put` bytes back. Whoever hosts
//! the engine picks the backend; the engine's own atomicity story for the
//! multi-record purchase is built on top (see [`crate::assets`]).
//!
//! ## Architecture
//!
//! ```text
//! mod.rs        — StateStore trait, StoreError, JSON record codec
//! memory.rs     — HashMap-backed store for tests and ephemeral use
//! sled_store.rs — Embedded sled tree for real deployments
//! ```
//!
//! ## Design Decisions
//!
//! 1. **JSON for record bytes.** Field order is irrelevant, every field
//!    round-trips, and `u64` amounts survive intact. Compactness doesn't
//!    matter at registry scale; debuggability does.
//! 2. **Absence is `Ok(None)`.** A missing record is a normal answer the
//!    engine turns into its own NotFound. Only backend failures are errors.

mod memory;
mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::error::{RegistryError, RegistryResult};
use crate::keys::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures at the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend itself failed (I/O, corruption, out of space).
    #[error("backend failure: {0}")]
    Backend(String),

    /// Stored bytes could not be decoded into the expected record type,
    /// or a record could not be encoded for writing.
    #[error("codec failure at {address}: {message}")]
    Codec {
        /// The address whose bytes were unusable.
        address: Address,
        /// What went wrong.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

/// The collaborator contract: a key-value store addressed by derived keys.
///
/// Implementations must apply each call atomically and in isolation, and
/// must let a read within one engine operation observe the operation's own
/// earlier writes (read-your-writes). Both bundled backends satisfy this
/// trivially; a remote backend must guarantee it.
pub trait StateStore {
    /// Reads the bytes at `address`. Absence is `Ok(None)`.
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes `value` at `address`, overwriting any previous value.
    fn put(&self, address: &Address, value: &[u8]) -> Result<(), StoreError>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(address)
    }

    fn put(&self, address: &Address, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(address, value)
    }
}

impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn get(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(address)
    }

    fn put(&self, address: &Address, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(address, value)
    }
}

// ---------------------------------------------------------------------------
// Record Codec
// ---------------------------------------------------------------------------

/// Reads and decodes the record at `address`, or `None` if absent.
///
/// Backend and codec failures both surface as
/// [`RegistryError::StoreUnavailable`] — undecodable bytes mean the
/// collaborator's state is corrupt, which is its failure, not the caller's.
pub fn get_record<S, T>(
    store: &S,
    operation: &'static str,
    address: &Address,
) -> RegistryResult<Option<T>>
where
    S: StateStore + ?Sized,
    T: DeserializeOwned,
{
    let bytes = store
        .get(address)
        .map_err(|source| RegistryError::StoreUnavailable { operation, source })?;

    match bytes {
        None => Ok(None),
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RegistryError::StoreUnavailable {
                operation,
                source: StoreError::Codec {
                    address: address.clone(),
                    message: e.to_string(),
                },
            }),
    }
}

/// Reads the record at `address`, failing with NotFound if absent.
pub fn require_record<S, T>(
    store: &S,
    operation: &'static str,
    address: &Address,
) -> RegistryResult<T>
where
    S: StateStore + ?Sized,
    T: DeserializeOwned,
{
    get_record(store, operation, address)?.ok_or_else(|| RegistryError::NotFound {
        operation,
        address: address.clone(),
    })
}

/// Encodes `record` as JSON, ready for a `put` at `address`.
///
/// Split out from [`put_record`] so the purchase transaction can encode
/// its whole write set up front, before the first byte hits the store.
pub fn encode_record<T>(
    operation: &'static str,
    address: &Address,
    record: &T,
) -> RegistryResult<Vec<u8>>
where
    T: Serialize,
{
    serde_json::to_vec(record).map_err(|e| RegistryError::StoreUnavailable {
        operation,
        source: StoreError::Codec {
            address: address.clone(),
            message: e.to_string(),
        },
    })
}

/// Encodes `record` as JSON and writes it at `address`.
pub fn put_record<S, T>(
    store: &S,
    operation: &'static str,
    address: &Address,
    record: &T,
) -> RegistryResult<()>
where
    S: StateStore + ?Sized,
    T: Serialize,
{
    let bytes = encode_record(operation, address, record)?;

    store
        .put(address, &bytes)
        .map_err(|source| RegistryError::StoreUnavailable { operation, source })
}
