//! OBD diagnostics command implementation.

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Args, Debug)]
pub struct ObdArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ObdArgs) -> Result<()> {
    let session = require_session()?;

    let diagnostics =
        check_session(session.obd_diagnostics().await).context("Failed to fetch diagnostics")?;

    if diagnostics.is_empty() {
        output::note("No diagnostic codes found.");
        return Ok(());
    }

    output::json(&diagnostics, args.pretty)
}
