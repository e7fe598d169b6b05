//! Session persistence for the CLI.

pub mod storage;
