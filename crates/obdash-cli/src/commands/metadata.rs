//! Metadata command implementation.

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: MetadataArgs) -> Result<()> {
    let session = require_session()?;

    let metadata =
        check_session(session.vehicle_metadata().await).context("Failed to fetch metadata")?;

    if metadata.is_empty() {
        output::note("No metadata found.");
        return Ok(());
    }

    output::json(&metadata, args.pretty)
}
