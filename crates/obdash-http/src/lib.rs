//! obdash-http - reqwest-backed session client for the diagnostics API.

mod api;
mod client;
mod endpoints;
mod session;

pub use api::DashboardApi;
pub use session::RestSession;
