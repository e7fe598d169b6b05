//! Whoami command implementation.

use anyhow::Result;
use clap::Args;

use obdash_core::{DEFAULT_ROLE, Session};

use crate::commands::require_session;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = require_session()?;

    output::field("API", session.api().as_str());
    output::field("Role", session.role().as_deref().unwrap_or(DEFAULT_ROLE));

    Ok(())
}
