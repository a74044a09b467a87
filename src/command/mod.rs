//! Command framework
//!
//! A command is a value implementing [`Command`]. Behaviour shared by every
//! command is composed around it by [`run`]:
//!
//! 1. the global options (`--output`, `--verbose`, `--debug`) are validated
//! 2. the command validates its options (no request is made on failure)
//! 3. telemetry properties are collected and logged
//! 4. the command executes, and upstream failures are normalized into
//!    [`Error::Command`]

mod context;
mod options;
mod types;

pub use context::CommandContext;
pub use options::{coerce, Options};
pub use types::{Command, GlobalOptions, OptionDescriptor, GLOBAL_OPTIONS};

use crate::error::{Error, Result};
use crate::output::CommandOutput;
use serde_json::{Map, Value};
use tracing::debug;

/// Command options followed by the global options
pub fn all_options(command: &dyn Command) -> Vec<OptionDescriptor> {
    let mut options = command.options();
    options.extend(GLOBAL_OPTIONS);
    options
}

/// Telemetry properties of an invocation: global ones, then the command's
pub fn telemetry_properties(command: &dyn Command, options: &Options) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("debug".to_string(), Value::Bool(options.flag("debug")));
    props.insert("verbose".to_string(), Value::Bool(options.flag("verbose")));
    props.insert(
        "output".to_string(),
        Value::String(options.text("output").unwrap_or_else(|| "text".to_string())),
    );
    props.extend(command.telemetry_properties(options));
    props
}

/// Validate a command's options, global options included
pub fn validate(command: &dyn Command, options: &Options) -> Result<GlobalOptions> {
    let global = GlobalOptions::from_options(options)?;
    command.validate(options).map_err(Error::validation)?;
    Ok(global)
}

/// Validate, then execute a command with normalized errors
pub async fn run(
    command: &dyn Command,
    ctx: &CommandContext,
    options: &Options,
) -> Result<CommandOutput> {
    validate(command, options)?;

    let props = Value::Object(telemetry_properties(command, options));
    debug!("Executing '{}' with {}", command.name(), props);

    command
        .execute(ctx, options)
        .await
        .map_err(Error::normalize)
}

#[cfg(test)]
mod tests;
