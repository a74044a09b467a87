// Allow common clippy pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]

//! o365 CLI
//!
//! Command-line interface for Microsoft Office 365 services

use o365_cli::cli::{log_level, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let runner = Runner::new();
    let matches = runner.cli().get_matches();

    // Logs go to stderr; RUST_LOG takes precedence over the flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level(&matches).into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match runner.run(&matches).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
