// Copyright (c) 2026 Regnet Contributors. MIT License.
// See LICENSE for details.

//! # regnet — Property Registration Network Engine
//!
//! The state-transition and authorization engine for a permissioned
//! property registry. Users request onboarding and property registration,
//! a registrar approves them, and approved users trade properties against
//! an internal credit balance.
//!
//! The engine owns the rules: which role may move which record between
//! which states, how records are addressed, and how the multi-record
//! purchase stays atomic. It does NOT own durability — records live behind
//! the [`store::StateStore`] contract (`get`/`put` on derived addresses),
//! and whoever operates the engine plugs in a backend.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of the
//! registry:
//!
//! - **records** — The four record types and their lifecycle semantics.
//! - **keys** — Deterministic, namespace-qualified address derivation.
//! - **access** — The role/operation permission table and the single gate.
//! - **store** — The key-value collaborator contract plus two backends
//!   (in-memory and sled).
//! - **identity** — User onboarding, approval, and coin recharge.
//! - **assets** — Property registration, listing, and the purchase
//!   transaction.
//! - **config** — Every magic value (namespace tags, recharge table).
//!
//! ## Design Philosophy
//!
//! 1. One authorization gate, consulted before any read or write — an
//!    omitted check is a bug class we refuse to have.
//! 2. All monetary operations check for overflow — wrapping arithmetic and
//!    money do not mix.
//! 3. Every public type is serializable (serde) for storage and display.
//! 4. If it touches coins, it has tests. Plural.

pub mod access;
pub mod assets;
pub mod config;
pub mod error;
pub mod identity;
pub mod keys;
pub mod records;
pub mod store;

pub use access::{Operation, Role};
pub use assets::{AssetRegistry, PurchaseReceipt};
pub use error::{RegistryError, RegistryResult};
pub use identity::IdentityRegistry;
pub use keys::{Address, Namespace};
pub use records::{ApprovedProperty, ApprovedUser, PropertyRequest, PropertyStatus, UserRequest};
pub use store::{MemoryStore, SledStore, StateStore, StoreError};
