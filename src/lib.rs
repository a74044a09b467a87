// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # o365
//!
//! Manage Microsoft Office 365 services from the command line.
//!
//! ## Commands
//!
//! - **`flow disable` / `flow enable`**: switch a Microsoft Flow off or on,
//!   optionally as administrator
//! - **`yammer message list`**: list messages of a feed, group or thread,
//!   following the `older_than` cursor until the feed or the limit runs out
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use o365_cli::cli::Runner;
//!
//! #[tokio::main]
//! async fn main() -> o365_cli::Result<()> {
//!     let runner = Runner::new();
//!     let output = runner
//!         .run_from(["o365", "yammer", "message", "list", "--feedType", "Sent", "--limit", "20"])
//!         .await?;
//!     println!("{output}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      cli (clap tree)                        │
//! │    argv → Invocation { command, Options, config file }      │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴───────────────────────────────┐
//! │   command::run: validate → telemetry → execute → normalize  │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────────┬────────────────────┐
//! │   commands   │       pagination        │       output       │
//! ├──────────────┼─────────────────────────┼────────────────────┤
//! │ flow         │ CursorPaginator         │ JSON               │
//! │ yammer       │ CursorAggregator        │ text table         │
//! └──────────────┴─────────────────────────┴────────────────────┘
//!                               │
//! ┌─────────────────────────────┴───────────────────────────────┐
//! │      http: reqwest client, bearer auth, rate limiting,      │
//! │            upstream error envelope normalization            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Authentication for outgoing requests
pub mod auth;

/// HTTP client, rate limiting and upstream error normalization
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Settings file and environment overrides
pub mod config;

/// Rendering command results
pub mod output;

/// Command trait, options and the shared run pipeline
pub mod command;

/// Built-in commands
pub mod commands;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use command::{Command, CommandContext, Options};
pub use config::Settings;
pub use output::{CommandOutput, OutputFormat};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
