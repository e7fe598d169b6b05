//! Core traits for session behavior.

mod session;

pub use session::Session;
