//! Sensors command implementation.

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Args, Debug)]
pub struct SensorsArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: SensorsArgs) -> Result<()> {
    let session = require_session()?;

    let points =
        check_session(session.sensor_chart().await).context("Failed to fetch sensor data")?;

    if points.is_empty() {
        output::note("No sensor readings found.");
        return Ok(());
    }

    output::json(&points, args.pretty)
}
