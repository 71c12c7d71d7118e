//! Command implementations for the CLI

pub mod completions;
pub mod config_cmd;
pub mod doctor;
pub mod remove;
pub mod start;
