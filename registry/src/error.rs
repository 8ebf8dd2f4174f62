//! # Engine Error Types
//!
//! Every engine operation fails with exactly one of five kinds, each
//! carrying the operation name and (where one exists) the offending
//! address — enough for the boundary layer to diagnose a failure without
//! inspecting engine internals.
//!
//! All errors are terminal for the operation that raised them. The engine
//! never retries internally; whether to retry is the caller's call.

use thiserror::Error;

use crate::keys::Address;
use crate::store::StoreError;

/// Errors raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The caller's role or ownership check failed. Raised before any read
    /// or write happens.
    #[error("{operation}: unauthorized: {reason}")]
    Unauthorized {
        /// The operation that was attempted.
        operation: &'static str,
        /// Why the caller was rejected (wrong role, or not the owner).
        reason: String,
    },

    /// A record the operation depends on is absent from the store.
    #[error("{operation}: no record at {address}")]
    NotFound {
        /// The operation that was attempted.
        operation: &'static str,
        /// The derived address that came up empty.
        address: Address,
    },

    /// The input itself is malformed — an unrecognized recharge code, a
    /// zero price, an unparseable status.
    #[error("{operation}: invalid argument: {message}")]
    InvalidArgument {
        /// The operation that was attempted.
        operation: &'static str,
        /// What was wrong with the input.
        message: String,
    },

    /// The input was well-formed but a business precondition failed
    /// (property not on sale, insufficient coins).
    #[error("{operation}: {reason}")]
    InvalidOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The precondition that failed.
        reason: String,
    },

    /// The collaborator store failed, or returned bytes the engine cannot
    /// decode. Never swallowed — always propagated to the caller.
    #[error("{operation}: store unavailable: {source}")]
    StoreUnavailable {
        /// The operation that was attempted.
        operation: &'static str,
        /// The underlying storage failure.
        #[source]
        source: StoreError,
    },
}

/// Shorthand result type for engine operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
