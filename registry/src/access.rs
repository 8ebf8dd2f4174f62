//! # Access Control
//!
//! One permission table, one gate. Every mutating operation declares
//! exactly one required role, and every registry entry point calls
//! [`authorize`] before touching the store. Centralizing the check here
//! means an operation cannot forget it — the table is the only place role
//! requirements exist.
//!
//! The caller's identity arrives as an opaque role tag, already
//! authenticated by the boundary layer. The engine only interprets the
//! tag; it never authenticates anything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The caller's authenticated category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// An end user: submits requests, recharges, trades.
    User,
    /// The registrar: approves onboarding and registration requests.
    Registrar,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Registrar => write!(f, "registrar"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    /// Parses the boundary layer's role tag. Exact match only — an
    /// unrecognized tag is an authentication-layer bug, not something to
    /// guess around.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "registrar" => Ok(Role::Registrar),
            other => Err(format!("unknown role tag: '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// Every operation the engine exposes.
///
/// Mutating operations carry their required role in [`required_role`];
/// the read-only views require none.
///
/// [`required_role`]: Operation::required_role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RequestNewUser,
    ApproveNewUser,
    RechargeAccount,
    ViewUser,
    PropertyRegistrationRequest,
    ApprovePropertyRegistration,
    ViewProperty,
    UpdateProperty,
    PurchaseProperty,
}

impl Operation {
    /// The operation name used in error context and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::RequestNewUser => "requestNewUser",
            Operation::ApproveNewUser => "approveNewUser",
            Operation::RechargeAccount => "rechargeAccount",
            Operation::ViewUser => "viewUser",
            Operation::PropertyRegistrationRequest => "propertyRegistrationRequest",
            Operation::ApprovePropertyRegistration => "approvePropertyRegistration",
            Operation::ViewProperty => "viewProperty",
            Operation::UpdateProperty => "updateProperty",
            Operation::PurchaseProperty => "purchaseProperty",
        }
    }

    /// The permission table: which role each operation demands.
    ///
    /// `None` means unrestricted — only the read-only views qualify.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Operation::RequestNewUser => Some(Role::User),
            Operation::ApproveNewUser => Some(Role::Registrar),
            Operation::RechargeAccount => Some(Role::User),
            Operation::ViewUser => None,
            Operation::PropertyRegistrationRequest => Some(Role::User),
            Operation::ApprovePropertyRegistration => Some(Role::Registrar),
            Operation::ViewProperty => None,
            Operation::UpdateProperty => Some(Role::User),
            Operation::PurchaseProperty => Some(Role::User),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// The Gate
// ---------------------------------------------------------------------------

/// Checks the caller's role against the permission table.
///
/// Called as the first step of every mutating operation, before any store
/// access. Denial costs nothing but the lookup.
///
/// # Errors
///
/// Returns [`RegistryError::Unauthorized`] naming the operation, the
/// required role, and the caller's role.
pub fn authorize(caller: Role, operation: Operation) -> RegistryResult<()> {
    match operation.required_role() {
        None => Ok(()),
        Some(required) if required == caller => Ok(()),
        Some(required) => Err(RegistryError::Unauthorized {
            operation: operation.name(),
            reason: format!("requires role '{required}', caller is '{caller}'"),
        }),
    }
}
