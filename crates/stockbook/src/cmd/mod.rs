//! Subcommand implementations.
//!
//! Each module owns one subcommand: its clap arguments and its `run`
//! function. The binary dispatches here after parsing.

pub mod delete;
pub mod edit;
pub mod init;
pub mod purchase;
pub mod sale;
pub mod show;
