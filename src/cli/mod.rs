//! CLI command handlers

pub mod commands;

pub use commands::{batch, fetch, stage};
