//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{
    export::ExportArgs, fusebox::FuseboxArgs, login::LoginArgs, metadata::MetadataArgs,
    obd::ObdArgs, sensors::SensorsArgs, users::UsersArgs, vehicles::VehiclesArgs,
    whoami::WhoamiArgs,
};

/// CLI for the vehicle diagnostics dashboard API.
#[derive(Parser, Debug)]
#[command(name = "obdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session
    Login(LoginArgs),

    /// Display the active session
    Whoami(WhoamiArgs),

    /// List all vehicles
    Vehicles(VehiclesArgs),

    /// Fetch vehicle metadata for the dashboard
    Metadata(MetadataArgs),

    /// Look up fuse boxes by make/model/year
    Fusebox(FuseboxArgs),

    /// Fetch the sensor time-series
    Sensors(SensorsArgs),

    /// Fetch OBD diagnostic codes
    Obd(ObdArgs),

    /// List user accounts
    Users(UsersArgs),

    /// Download a CSV or PDF export
    Export(ExportArgs),
}
