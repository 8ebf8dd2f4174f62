//! # CLI Interface
//!
//! Defines the command-line argument structure for `regnet-node` using
//! `clap` derive. One subcommand per engine operation, plus the two
//! read-only views.
//!
//! The `--role` flag on every mutating subcommand stands in for the
//! boundary layer that would normally authenticate the caller: whatever
//! tag it supplies is passed to the engine verbatim and interpreted
//! there.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use regnet_registry::{PropertyStatus, Role};

/// Operator CLI for the regnet property registration network.
///
/// Runs engine operations against a local sled-backed store. Records are
/// printed as JSON on success; failures name the operation and the
/// offending address.
#[derive(Parser, Debug)]
#[command(
    name = "regnet-node",
    about = "regnet property registration network CLI",
    version,
    propagate_version = true
)]
pub struct RegnetCli {
    /// Path to the data directory holding the registry store.
    ///
    /// Created on first use if it does not exist.
    #[arg(long, short = 'd', env = "REGNET_DATA_DIR", default_value = ".regnet", global = true)]
    pub data_dir: PathBuf,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "REGNET_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands, one per registry operation.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a user onboarding request.
    RequestUser(RequestUserArgs),
    /// Approve a pending onboarding request.
    ApproveUser(UserKeyArgs),
    /// Credit an approved user's balance from a bank transaction ID.
    Recharge(RechargeArgs),
    /// Look up an approved user.
    ViewUser(ViewUserArgs),
    /// Submit a property registration request.
    RequestProperty(RequestPropertyArgs),
    /// Approve a pending property registration.
    ApproveProperty(PropertyKeyArgs),
    /// Look up an approved property.
    ViewProperty(ViewPropertyArgs),
    /// Change a property's listing status (owner only).
    UpdateProperty(UpdatePropertyArgs),
    /// Buy a listed property.
    Purchase(PurchaseArgs),
}

/// Arguments for `request-user`.
#[derive(Parser, Debug)]
pub struct RequestUserArgs {
    /// Authenticated role tag of the caller.
    #[arg(long)]
    pub role: Role,

    /// Applicant name (part of the natural key).
    #[arg(long)]
    pub name: String,

    /// Contact email.
    #[arg(long)]
    pub email: String,

    /// Contact phone number.
    #[arg(long)]
    pub phone: String,

    /// National ID (part of the natural key).
    #[arg(long)]
    pub national_id: String,
}

/// Arguments for operations keyed by a user's natural key plus a role.
#[derive(Parser, Debug)]
pub struct UserKeyArgs {
    /// Authenticated role tag of the caller.
    #[arg(long)]
    pub role: Role,

    /// User name.
    #[arg(long)]
    pub name: String,

    /// National ID.
    #[arg(long)]
    pub national_id: String,
}

/// Arguments for `recharge`.
#[derive(Parser, Debug)]
pub struct RechargeArgs {
    /// Authenticated role tag of the caller.
    #[arg(long)]
    pub role: Role,

    /// User name.
    #[arg(long)]
    pub name: String,

    /// National ID.
    #[arg(long)]
    pub national_id: String,

    /// Settled bank transaction ID (upg100, upg500, or upg1000).
    #[arg(long)]
    pub transaction_id: String,
}

/// Arguments for `view-user` (read-only, no role).
#[derive(Parser, Debug)]
pub struct ViewUserArgs {
    /// User name.
    #[arg(long)]
    pub name: String,

    /// National ID.
    #[arg(long)]
    pub national_id: String,
}

/// Arguments for `request-property`.
#[derive(Parser, Debug)]
pub struct RequestPropertyArgs {
    /// Authenticated role tag of the caller.
    #[arg(long)]
    pub role: Role,

    /// Claimed owner's name.
    #[arg(long)]
    pub name: String,

    /// Claimed owner's national ID.
    #[arg(long)]
    pub national_id: String,

    /// Property identifier.
    #[arg(long)]
    pub property_id: String,

    /// Asking price in coins (must be > 0).
    #[arg(long)]
    pub price: u64,

    /// Initial listing status: "registered" or "onSale".
    #[arg(long)]
    pub status: PropertyStatus,
}

/// Arguments for operations keyed by a property ID plus a role.
#[derive(Parser, Debug)]
pub struct PropertyKeyArgs {
    /// Authenticated role tag of the caller.
    #[arg(long)]
    pub role: Role,

    /// Property identifier.
    #[arg(long)]
    pub property_id: String,
}

/// Arguments for `view-property` (read-only, no role).
#[derive(Parser, Debug)]
pub struct ViewPropertyArgs {
    /// Property identifier.
    #[arg(long)]
    pub property_id: String,
}

/// Arguments for `update-property`.
#[derive(Parser, Debug)]
pub struct UpdatePropertyArgs {
    /// Authenticated role tag of the caller.
    #[arg(long)]
    pub role: Role,

    /// Caller's name (must derive to the property's owner address).
    #[arg(long)]
    pub name: String,

    /// Caller's national ID.
    #[arg(long)]
    pub national_id: String,

    /// Property identifier.
    #[arg(long)]
    pub property_id: String,

    /// New listing status: "registered" or "onSale".
    #[arg(long)]
    pub status: PropertyStatus,
}

/// Arguments for `purchase`.
#[derive(Parser, Debug)]
pub struct PurchaseArgs {
    /// Authenticated role tag of the caller (the buyer).
    #[arg(long)]
    pub role: Role,

    /// Buyer's name.
    #[arg(long)]
    pub name: String,

    /// Buyer's national ID.
    #[arg(long)]
    pub national_id: String,

    /// Property identifier.
    #[arg(long)]
    pub property_id: String,
}
