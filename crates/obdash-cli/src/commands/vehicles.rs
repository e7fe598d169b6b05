//! Vehicles command implementation.

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Args, Debug)]
pub struct VehiclesArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: VehiclesArgs) -> Result<()> {
    let session = require_session()?;

    let vehicles =
        check_session(session.list_vehicles().await).context("Failed to list vehicles")?;

    if vehicles.is_empty() {
        output::note("No vehicles found.");
        return Ok(());
    }

    output::json(&vehicles, args.pretty)
}
