//! Export command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    /// Sensor data as CSV
    Csv,
    /// Sensor report as PDF
    Pdf,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// File to write the export to
    #[arg(long)]
    pub out: PathBuf,
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let session = require_session()?;

    let bytes = match args.format {
        ExportFormat::Csv => check_session(session.export_csv().await),
        ExportFormat::Pdf => check_session(session.export_pdf().await),
    }
    .context("Failed to download export")?;

    fs::write(&args.out, &bytes)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    output::success(&format!(
        "Wrote {} bytes to {}",
        bytes.len(),
        args.out.display()
    ));

    Ok(())
}
