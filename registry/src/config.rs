//! # Registry Configuration & Constants
//!
//! Every magic value in regnet lives here. If you're hardcoding a namespace
//! tag or a recharge amount somewhere else, you're doing it wrong.
//!
//! The namespace tags and the key prefix are part of the storage layout:
//! changing them after a store has data in it orphans every existing record,
//! so choose wisely before anything ships.

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Prefix applied to every derived storage address. Keeps regnet records
/// recognizable (and non-colliding) inside a store shared with other data.
pub const KEY_PREFIX: &str = "regnet";

/// Separator between the namespace tag and the natural key.
///
/// The tag never contains this character, so two different namespaces can
/// never produce the same address for the same natural key.
pub const KEY_SEPARATOR: &str = ":";

/// Separator used to join multi-part natural keys (e.g. `name-nationalID`).
pub const NATURAL_KEY_SEPARATOR: &str = "-";

/// Namespace tag for pending user onboarding requests.
pub const NS_USER_REQUEST: &str = "user-request";

/// Namespace tag for approved users (the records that carry coin balances).
pub const NS_APPROVED_USER: &str = "approved-user";

/// Namespace tag for pending property registration requests.
pub const NS_PROPERTY_REQUEST: &str = "property-request";

/// Namespace tag for approved properties (the tradeable records).
pub const NS_APPROVED_PROPERTY: &str = "approved-property";

// ---------------------------------------------------------------------------
// Recharge Table
// ---------------------------------------------------------------------------

/// The exact-match table mapping bank transaction IDs to coin credits.
///
/// Recharge is deliberately not a free-form amount: the boundary layer
/// settles fiat against one of these fixed denominations and passes the
/// matching code through. Anything outside the table is rejected.
pub const RECHARGE_TABLE: [(&str, u64); 3] = [
    ("upg100", 100),
    ("upg500", 500),
    ("upg1000", 1000),
];

/// Look up the coin credit for a bank transaction ID.
///
/// Returns `None` for unrecognized codes — the caller turns that into an
/// `InvalidArgument` error.
pub fn recharge_amount(transaction_id: &str) -> Option<u64> {
    RECHARGE_TABLE
        .iter()
        .find(|(code, _)| *code == transaction_id)
        .map(|(_, amount)| *amount)
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Name of the sled tree holding all registry records.
pub const RECORDS_TREE: &str = "records";
