//! Users command implementation.

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::Session;

use crate::commands::{check_session, require_session};
use crate::output;

#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: UsersArgs) -> Result<()> {
    let session = require_session()?;

    let users = check_session(session.list_users().await).context("Failed to list users")?;

    if users.is_empty() {
        output::note("No users found.");
        return Ok(());
    }

    output::json(&users, args.pretty)
}
