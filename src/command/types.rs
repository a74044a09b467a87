//! Command interface types

use super::context::CommandContext;
use super::options::Options;
use crate::error::Result;
use crate::output::{CommandOutput, OutputFormat};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A command-line flag a command accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Long flag name without dashes, also the key in [`Options`]
    pub long: &'static str,
    /// Optional single-letter alias
    pub short: Option<char>,
    /// Placeholder for the value; `None` for boolean flags
    pub value_name: Option<&'static str>,
    /// Help text
    pub description: &'static str,
}

impl OptionDescriptor {
    /// A boolean flag
    pub const fn flag(long: &'static str, description: &'static str) -> Self {
        Self {
            long,
            short: None,
            value_name: None,
            description,
        }
    }

    /// An option taking a value
    pub const fn value(
        long: &'static str,
        value_name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            long,
            short: None,
            value_name: Some(value_name),
            description,
        }
    }

    /// Add a single-letter alias
    #[must_use]
    pub const fn short(self, short: char) -> Self {
        Self {
            short: Some(short),
            ..self
        }
    }

    /// Whether this option takes a value
    pub fn takes_value(&self) -> bool {
        self.value_name.is_some()
    }

    /// Usage string, e.g. `-f, --feedType [feedType]`
    pub fn usage(&self) -> String {
        let mut usage = String::new();
        if let Some(short) = self.short {
            usage.push('-');
            usage.push(short);
            usage.push_str(", ");
        }
        usage.push_str("--");
        usage.push_str(self.long);
        if let Some(value_name) = self.value_name {
            usage.push_str(" [");
            usage.push_str(value_name);
            usage.push(']');
        }
        usage
    }
}

/// Options every command accepts
pub const GLOBAL_OPTIONS: [OptionDescriptor; 3] = [
    OptionDescriptor::value(
        "output",
        "output",
        "Output type. json|text. Default text",
    )
    .short('o'),
    OptionDescriptor::flag("verbose", "Runs command with verbose logging"),
    OptionDescriptor::flag("debug", "Runs command with debug logging"),
];

/// Global options as typed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlobalOptions {
    pub output: OutputFormat,
    pub verbose: bool,
    pub debug: bool,
}

impl GlobalOptions {
    /// Read the global options out of a parsed option set
    pub fn from_options(options: &Options) -> Result<Self> {
        let output = match options.text("output") {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            output,
            verbose: options.flag("verbose"),
            debug: options.flag("debug"),
        })
    }
}

/// A CLI verb
///
/// Implementations are stateless values; all per-invocation state lives in
/// the [`Options`] and the [`CommandContext`] passed to [`execute`](Self::execute).
#[async_trait]
pub trait Command: Send + Sync {
    /// Full command name, words separated by spaces (`flow disable`)
    fn name(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Command-specific options, global options excluded
    fn options(&self) -> Vec<OptionDescriptor>;

    /// Check an option set before anything is sent.
    ///
    /// Returns a message naming the offending option on failure.
    fn validate(&self, options: &Options) -> std::result::Result<(), String>;

    /// Remarks and examples shown by `--help`
    fn help(&self) -> &'static str;

    /// Which options were used, for diagnostics
    fn telemetry_properties(&self, _options: &Options) -> Map<String, Value> {
        Map::new()
    }

    /// Run the command
    async fn execute(&self, ctx: &CommandContext, options: &Options) -> Result<CommandOutput>;
}
