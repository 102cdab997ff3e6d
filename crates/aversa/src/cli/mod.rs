//! Command handlers for the aversa CLI.

pub mod config;
pub mod process;
