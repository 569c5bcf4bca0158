//! Command-line interface for batch sprite preparation
//!
//! Enabled with the `cli` feature.

mod config;
#[path = "main.rs"]
pub(crate) mod main_impl;

pub use main_impl::{main, Cli, CliOutputFormat, CliSplitLayout};
