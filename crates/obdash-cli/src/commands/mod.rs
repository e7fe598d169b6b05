//! Subcommand implementations.

pub mod export;
pub mod fusebox;
pub mod login;
pub mod metadata;
pub mod obd;
pub mod sensors;
pub mod users;
pub mod vehicles;
pub mod whoami;

use anyhow::{Context, Result};

use obdash_http::RestSession;

use crate::cli::Commands;
use crate::output;
use crate::session::storage;

pub async fn handle(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Login(args) => login::run(args).await,
        Commands::Whoami(args) => whoami::run(args).await,
        Commands::Vehicles(args) => vehicles::run(args).await,
        Commands::Metadata(args) => metadata::run(args).await,
        Commands::Fusebox(args) => fusebox::run(args).await,
        Commands::Sensors(args) => sensors::run(args).await,
        Commands::Obd(args) => obd::run(args).await,
        Commands::Users(args) => users::run(args).await,
        Commands::Export(args) => export::run(args).await,
    }
}

/// Load the persisted session or fail with a login hint.
pub(crate) fn require_session() -> Result<RestSession> {
    storage::open_session()
        .context("Failed to load session")?
        .context("No active session. Run 'obdash login' first.")
}

/// Surface an API call result, translating session expiry into a
/// re-login hint. By the time this runs the session layer has already
/// cleared the stored credential.
pub(crate) fn check_session<T>(result: obdash_core::Result<T>) -> Result<T> {
    match result {
        Err(e) if e.is_unauthorized() => {
            output::error("Session expired. Run 'obdash login' again.");
            Err(anyhow::Error::new(e))
        }
        other => other.map_err(anyhow::Error::new),
    }
}
