// Copyright (c) 2026 Regnet Contributors. MIT License.
// See LICENSE for details.

//! # regnet Operator CLI
//!
//! Entry point for the `regnet-node` binary. Parses CLI arguments,
//! initializes logging, opens the sled-backed store, and dispatches one
//! engine operation per invocation. The resulting record (or purchase
//! receipt) is printed to stdout as pretty JSON; logs go to stderr.
//!
//! The binary is the stand-in for whatever boundary layer hosts the
//! engine in a real deployment — it supplies the authenticated role tag
//! via `--role` and owns nothing else. All rules live in
//! `regnet-registry`.

mod cli;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use regnet_registry::{AssetRegistry, IdentityRegistry, SledStore};

use cli::{Commands, RegnetCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = RegnetCli::parse();
    logging::init_logging(
        "regnet_node=info,regnet_registry=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    tracing::info!(data_dir = %cli.data_dir.display(), "opening registry store");
    let store = Arc::new(
        SledStore::open(&cli.data_dir)
            .with_context(|| format!("failed to open store at {}", cli.data_dir.display()))?,
    );
    let identity = IdentityRegistry::new(Arc::clone(&store));
    let assets = AssetRegistry::new(Arc::clone(&store));

    match cli.command {
        Commands::RequestUser(args) => print_record(&identity.request_new_user(
            args.role,
            &args.name,
            &args.email,
            &args.phone,
            &args.national_id,
        )?),
        Commands::ApproveUser(args) => print_record(&identity.approve_new_user(
            args.role,
            &args.name,
            &args.national_id,
        )?),
        Commands::Recharge(args) => print_record(&identity.recharge_account(
            args.role,
            &args.name,
            &args.national_id,
            &args.transaction_id,
        )?),
        Commands::ViewUser(args) => {
            print_record(&identity.view_user(&args.name, &args.national_id)?)
        }
        Commands::RequestProperty(args) => print_record(&assets.property_registration_request(
            args.role,
            &args.name,
            &args.national_id,
            &args.property_id,
            args.price,
            args.status,
        )?),
        Commands::ApproveProperty(args) => print_record(
            &assets.approve_property_registration(args.role, &args.property_id)?,
        ),
        Commands::ViewProperty(args) => print_record(&assets.view_property(&args.property_id)?),
        Commands::UpdateProperty(args) => print_record(&assets.update_property(
            args.role,
            &args.name,
            &args.national_id,
            &args.property_id,
            args.status,
        )?),
        Commands::Purchase(args) => print_record(&assets.purchase_property(
            args.role,
            &args.name,
            &args.national_id,
            &args.property_id,
        )?),
    }?;

    // One operation per invocation — make it durable before exiting.
    store.flush().context("failed to flush store")?;
    Ok(())
}

/// Prints a record to stdout as pretty JSON.
fn print_record<T: Serialize>(record: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
