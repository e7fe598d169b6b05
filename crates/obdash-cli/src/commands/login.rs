//! Login command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use obdash_core::{ApiUrl, Credentials, DEFAULT_ROLE, Session};
use obdash_http::DashboardApi;

use crate::output;
use crate::session::storage::{self, FileStore};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// API base URL
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub api: String,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let api_url = ApiUrl::new(&args.api).context("Invalid API URL")?;
    let credentials = Credentials::new(&args.username, &args.password);

    output::note("Logging in...");

    let path = storage::session_path()?;
    let store = Arc::new(FileStore::new(path, api_url.clone()));

    let api = DashboardApi::new(api_url.clone());
    let session = api
        .login(credentials, store)
        .await
        .context("Failed to login")?;

    // Print success
    output::success("Logged in successfully");
    println!();
    output::field("API", api_url.as_str());
    output::field("Role", session.role().as_deref().unwrap_or(DEFAULT_ROLE));

    Ok(())
}
