//! # Registry Records
//!
//! The four record types the engine moves between states, plus the
//! property listing status. Each record serializes to JSON via serde —
//! the store only ever sees bytes, and integer amounts (`u64` coins and
//! prices) round-trip exactly.
//!
//! Lifecycle in one line each:
//!
//! - [`UserRequest`] — written by a user, consumed (read, never deleted)
//!   by registrar approval.
//! - [`ApprovedUser`] — created by approval with a zero coin balance;
//!   mutated by recharge and purchase; never deleted.
//! - [`PropertyRequest`] — written by a user for a property they claim to
//!   own; consumed by registrar approval.
//! - [`ApprovedProperty`] — the tradeable record; mutated by status update
//!   (owner only) and purchase.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::Address;

// ---------------------------------------------------------------------------
// PropertyStatus
// ---------------------------------------------------------------------------

/// Listing status of an approved property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    /// Registered to its owner, not listed for sale.
    #[serde(rename = "registered")]
    Registered,
    /// Listed for sale — purchasable by any approved user with the coins.
    #[serde(rename = "onSale")]
    OnSale,
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyStatus::Registered => write!(f, "registered"),
            PropertyStatus::OnSale => write!(f, "onSale"),
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(PropertyStatus::Registered),
            "onSale" => Ok(PropertyStatus::OnSale),
            other => Err(format!(
                "unknown property status '{other}' (expected 'registered' or 'onSale')"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// User Records
// ---------------------------------------------------------------------------

/// A pending onboarding request, exactly as the user submitted it.
///
/// Immutable once created; a re-submission under the same name and
/// national ID silently overwrites the previous request (last write wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    /// The applicant's name. Part of the natural key.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Government-issued national ID. Part of the natural key.
    pub national_id: String,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

/// An approved user — the record that carries the coin balance.
///
/// Created by registrar approval as a copy of the request with a zero
/// balance. Never deleted. The balance is the sole medium of exchange in
/// property purchases and can never go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedUser {
    /// The user's name. Part of the natural key.
    pub name: String,
    /// Contact email, copied from the request.
    pub email: String,
    /// Contact phone number, copied from the request.
    pub phone: String,
    /// National ID. Part of the natural key.
    pub national_id: String,
    /// When the original onboarding request was submitted.
    pub created_at: DateTime<Utc>,
    /// Internal credit balance. Non-negative by construction (`u64`);
    /// every mutation goes through checked arithmetic.
    pub coin_balance: u64,
}

impl ApprovedUser {
    /// Builds the approved record from a consumed onboarding request.
    ///
    /// All request fields are preserved; the balance starts at zero.
    pub fn from_request(request: UserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            national_id: request.national_id,
            created_at: request.created_at,
            coin_balance: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Property Records
// ---------------------------------------------------------------------------

/// A pending property registration request.
///
/// The `owner` field is a back-reference: the approved-user address
/// derived from the submitting caller's identity. It is recorded here so
/// approval knows which user to treat as the owner — it is not validated
/// for existence at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRequest {
    /// The property's identifier. The natural key.
    pub property_id: String,
    /// Back-reference to the claimed owner's approved-user address.
    pub owner: Address,
    /// Asking price in coins. Always > 0.
    pub price: u64,
    /// Requested initial listing status.
    pub status: PropertyStatus,
}

/// An approved, tradeable property.
///
/// Created by registrar approval as a verbatim copy of the request.
/// `owner` always resolves to an existing approved user once trading
/// begins; status transitions are owner-gated, and purchase rewrites both
/// owner and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedProperty {
    /// The property's identifier. The natural key.
    pub property_id: String,
    /// Address of the current owner's approved-user record.
    pub owner: Address,
    /// Current price in coins.
    pub price: u64,
    /// Current listing status.
    pub status: PropertyStatus,
}

impl ApprovedProperty {
    /// Builds the approved record from a consumed registration request.
    pub fn from_request(request: PropertyRequest) -> Self {
        Self {
            property_id: request.property_id,
            owner: request.owner,
            price: request.price,
            status: request.status,
        }
    }
}
