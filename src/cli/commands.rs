//! CLI argument parsing
//!
//! The clap tree is generated from the registered commands: each word of a
//! command name becomes a nested subcommand, and each [`OptionDescriptor`]
//! becomes an argument of the leaf.

use crate::command::{all_options, Command, OptionDescriptor, Options, GLOBAL_OPTIONS};
use crate::config::ENV_CONFIG;
use crate::error::{Error, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::Level;

/// Executable name
pub const BIN_NAME: &str = "o365";

/// A parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Full command name (`yammer message list`)
    pub command: String,
    /// Options given to the command, global options included
    pub options: Options,
    /// Settings file, from `--config` or the environment
    pub config: Option<PathBuf>,
}

/// Build the argument parser for a set of commands
pub fn build_cli(registry: &[Box<dyn Command>]) -> clap::Command {
    let mut root = clap::Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage Microsoft Office 365 and Yammer from the command line")
        .subcommand_required(true)
        .arg_required_else_help(true);

    for option in &GLOBAL_OPTIONS {
        root = root.arg(to_arg(option).global(true));
    }

    root = root.arg(
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .help("Settings file (YAML)")
            .env(ENV_CONFIG)
            .value_parser(value_parser!(PathBuf))
            .global(true),
    );

    let mut tree = Group::default();
    for command in registry {
        let words: Vec<&'static str> = command.name().split(' ').collect();
        tree.insert(&words, command.as_ref());
    }

    tree.attach(root)
}

/// Resolve matches to a command name and its options
pub fn parse_matches(matches: &ArgMatches, registry: &[Box<dyn Command>]) -> Result<Invocation> {
    let mut words = Vec::new();
    let mut leaf = matches;
    while let Some((name, sub)) = leaf.subcommand() {
        words.push(name);
        leaf = sub;
    }

    let name = words.join(" ");
    let command = registry
        .iter()
        .find(|command| command.name() == name)
        .ok_or_else(|| Error::UnknownCommand { name: name.clone() })?;

    Ok(Invocation {
        command: name,
        options: options_from_matches(command.as_ref(), leaf),
        config: leaf.try_get_one::<PathBuf>("config").ok().flatten().cloned(),
    })
}

/// Read a command's options out of its leaf matches.
///
/// Values go through [`Options::set_raw`], so numeric text becomes a number.
/// Flags are only recorded when given.
pub fn options_from_matches(command: &dyn Command, matches: &ArgMatches) -> Options {
    let mut options = Options::new();

    for option in all_options(command) {
        if option.takes_value() {
            if let Ok(Some(raw)) = matches.try_get_one::<String>(option.long) {
                options.set_raw(option.long, raw);
            }
        } else if let Ok(Some(&true)) = matches.try_get_one::<bool>(option.long) {
            options.set(option.long, true);
        }
    }

    options
}

/// Log level selected by `--verbose` / `--debug`
pub fn log_level(matches: &ArgMatches) -> Level {
    let flag = |id: &str| matches!(matches.try_get_one::<bool>(id), Ok(Some(&true)));

    if flag("debug") {
        Level::DEBUG
    } else if flag("verbose") {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn to_arg(option: &OptionDescriptor) -> Arg {
    let mut arg = Arg::new(option.long)
        .long(option.long)
        .help(option.description);

    if let Some(short) = option.short {
        arg = arg.short(short);
    }

    match option.value_name {
        Some(value_name) => arg
            .value_name(value_name)
            .action(ArgAction::Set)
            .allow_negative_numbers(true),
        None => arg.action(ArgAction::SetTrue),
    }
}

fn group_about(word: &str) -> &'static str {
    match word {
        "flow" => "Manage Microsoft Flow",
        "yammer" => "Manage Yammer",
        "message" => "Manage Yammer messages",
        _ => "",
    }
}

/// Intermediate tree of command words
#[derive(Default)]
struct Group<'a> {
    groups: BTreeMap<&'static str, Group<'a>>,
    leaves: Vec<(&'static str, &'a dyn Command)>,
}

impl<'a> Group<'a> {
    fn insert(&mut self, words: &[&'static str], command: &'a dyn Command) {
        match words {
            [] => {}
            [word] => self.leaves.push((*word, command)),
            [word, rest @ ..] => self.groups.entry(*word).or_default().insert(rest, command),
        }
    }

    fn attach(self, mut parent: clap::Command) -> clap::Command {
        for (word, group) in self.groups {
            let sub = clap::Command::new(word)
                .about(group_about(word))
                .subcommand_required(true)
                .arg_required_else_help(true);
            parent = parent.subcommand(group.attach(sub));
        }

        for (word, command) in self.leaves {
            let mut leaf = clap::Command::new(word)
                .about(command.description())
                .after_help(command.help());
            for option in command.options() {
                leaf = leaf.arg(to_arg(&option));
            }
            parent = parent.subcommand(leaf);
        }

        parent
    }
}
