//! CLI module
//!
//! Command-line interface over the command registry.
//!
//! # Commands
//!
//! - `flow disable` - Disable a Microsoft Flow
//! - `flow enable` - Enable a Microsoft Flow
//! - `yammer message list` - List Yammer messages

mod commands;
mod runner;

pub use commands::{
    build_cli, log_level, options_from_matches, parse_matches, Invocation, BIN_NAME,
};
pub use runner::Runner;
