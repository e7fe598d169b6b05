//! Fuse-box lookup command implementation.

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Args, Debug)]
pub struct FuseboxArgs {
    /// Vehicle make
    #[arg(long)]
    pub make: String,

    /// Vehicle model
    #[arg(long)]
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: u16,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: FuseboxArgs) -> Result<()> {
    let session = require_session()?;

    let boxes = check_session(
        session
            .fusebox_lookup(&args.make, &args.model, args.year)
            .await,
    )
    .context("Failed to look up fuse boxes")?;

    if boxes.is_empty() {
        output::note(&format!(
            "No fuse boxes found for {} {} ({}).",
            args.make, args.model, args.year
        ));
        return Ok(());
    }

    output::json(&boxes, args.pretty)
}
