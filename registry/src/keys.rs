//! # Key Derivation
//!
//! Maps a logical entity (a user or a property) to its storage address.
//! Derivation is a pure function: same namespace + same natural key =>
//! same address, for every caller, forever. There is no secondary index —
//! the derived address is the only way any record is ever found.
//!
//! ## Address Format
//!
//! ```text
//! regnet.<namespace-tag>:<natural-key-parts joined with "-">
//! ```
//!
//! Example: `regnet.approved-user:alice-111`
//!
//! The namespace tag sits before the `:` and never contains one, so two
//! different namespaces applied to the same natural key can never collide.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// Namespace
// ---------------------------------------------------------------------------

/// The record category an address belongs to.
///
/// Request and approved records for the same entity live under different
/// namespaces: approval reads from one and writes to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Pending user onboarding requests.
    UserRequest,
    /// Approved users (carry the coin balance).
    ApprovedUser,
    /// Pending property registration requests.
    PropertyRequest,
    /// Approved, tradeable properties.
    ApprovedProperty,
}

impl Namespace {
    /// The stable tag embedded in derived addresses.
    pub fn tag(&self) -> &'static str {
        match self {
            Namespace::UserRequest => config::NS_USER_REQUEST,
            Namespace::ApprovedUser => config::NS_APPROVED_USER,
            Namespace::PropertyRequest => config::NS_PROPERTY_REQUEST,
            Namespace::ApprovedProperty => config::NS_APPROVED_PROPERTY,
        }
    }

    /// Derives the storage address for a natural key under this namespace.
    ///
    /// Deterministic and stateless. Multi-part natural keys are joined with
    /// `-`, matching the registry convention of `name-nationalID` for users.
    pub fn derive(&self, natural_key_parts: &[&str]) -> Address {
        let natural_key = natural_key_parts.join(config::NATURAL_KEY_SEPARATOR);
        Address(format!(
            "{}.{}{}{}",
            config::KEY_PREFIX,
            self.tag(),
            config::KEY_SEPARATOR,
            natural_key
        ))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A derived, namespace-qualified storage address.
///
/// Addresses are plain lookup keys. When a record embeds one (a property's
/// owner field), it is a foreign-key-style back-reference — never a shared
/// mutable reference to the record it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address as raw bytes, as handed to the store.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Record-Kind Helpers
// ---------------------------------------------------------------------------

/// Address of a pending user request for `name` + `national_id`.
pub fn user_request(name: &str, national_id: &str) -> Address {
    Namespace::UserRequest.derive(&[name, national_id])
}

/// Address of an approved user for `name` + `national_id`.
pub fn approved_user(name: &str, national_id: &str) -> Address {
    Namespace::ApprovedUser.derive(&[name, national_id])
}

/// Address of a pending property request for `property_id`.
pub fn property_request(property_id: &str) -> Address {
    Namespace::PropertyRequest.derive(&[property_id])
}

/// Address of an approved property for `property_id`.
pub fn approved_property(property_id: &str) -> Address {
    Namespace::ApprovedProperty.derive(&[property_id])
}
