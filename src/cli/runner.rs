//! CLI runner - executes commands

use crate::cli::commands::{build_cli, parse_matches};
use crate::command::{self, Command, CommandContext, GlobalOptions};
use crate::commands;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::output::render;
use clap::ArgMatches;
use tracing::debug;

/// CLI runner
pub struct Runner {
    registry: Vec<Box<dyn Command>>,
    settings: Option<Settings>,
}

impl Runner {
    /// Create a runner over every registered command
    pub fn new() -> Self {
        Self {
            registry: commands::registry(),
            settings: None,
        }
    }

    /// Use fixed settings instead of loading them for each invocation
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The argument parser for the registered commands
    pub fn cli(&self) -> clap::Command {
        build_cli(&self.registry)
    }

    /// Run the command selected by `matches` and return the rendered output
    pub async fn run(&self, matches: &ArgMatches) -> Result<String> {
        let invocation = parse_matches(matches, &self.registry)?;
        let command = self
            .registry
            .iter()
            .find(|command| command.name() == invocation.command)
            .ok_or_else(|| Error::UnknownCommand {
                name: invocation.command.clone(),
            })?;

        let global = GlobalOptions::from_options(&invocation.options)?;
        let settings = match &self.settings {
            Some(settings) => settings.clone(),
            None => Settings::load(invocation.config.as_deref())?,
        };
        debug!("Resolved settings: {:?}", settings);

        let ctx = CommandContext::new(settings);
        let output = command::run(command.as_ref(), &ctx, &invocation.options).await?;
        render(&output, global.output)
    }

    /// Parse `args` and run the selected command
    pub async fn run_from<I, T>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = self
            .cli()
            .try_get_matches_from(args)
            .map_err(|e| Error::validation(e.to_string()))?;
        self.run(&matches).await
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.registry.iter().map(|c| c.name()).collect();
        f.debug_struct("Runner")
            .field("commands", &names)
            .field("settings", &self.settings)
            .finish()
    }
}
