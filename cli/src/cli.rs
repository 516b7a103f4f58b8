// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use timetab_core::APP_NAME;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::arg::CommonArgs;
use crate::cmd_event::{CmdEventAdd, CmdEventList, CmdEventNotify, CmdEventRemove, CmdEventSearch};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_lecture::CmdLectureSearch;
use crate::config::parse_config;

/// Run the timetab command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    }
    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG` and warnings only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Event calendar and course timetable builder with conflict detection.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $TIMETAB_CONFIG, then \
$XDG_CONFIG_HOME/timetab/config.toml on Linux and MacOS, %LOCALAPPDATA%/timetab/config.toml \
on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(CommonArgs::output_format())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventAdd::command())
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventSearch::command())
                    .subcommand(CmdEventRemove::command())
                    .subcommand(CmdEventNotify::command()),
            )
            .subcommand(
                Command::new("lecture")
                    .alias("l")
                    .about("Browse the lecture catalog")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdLectureSearch::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventAdd::NAME, matches)) => EventAdd(CmdEventAdd::from(matches)),
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventSearch::NAME, matches)) => EventSearch(CmdEventSearch::from(matches)),
                Some((CmdEventRemove::NAME, matches)) => EventRemove(CmdEventRemove::from(matches)),
                Some((CmdEventNotify::NAME, matches)) => EventNotify(CmdEventNotify::from(matches)),
                _ => return Err("Unknown event command".into()),
            },
            Some(("lecture", matches)) => match matches.subcommand() {
                Some((CmdLectureSearch::NAME, matches)) => {
                    LectureSearch(CmdLectureSearch::from(matches))
                }
                _ => return Err("Unknown lecture command".into()),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            _ => return Err("No command given".into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Add an event
    EventAdd(CmdEventAdd),

    /// List the events of a week or month
    EventList(CmdEventList),

    /// Search events
    EventSearch(CmdEventSearch),

    /// Remove events
    EventRemove(CmdEventRemove),

    /// Show due reminders
    EventNotify(CmdEventNotify),

    /// Search the lecture catalog
    LectureSearch(CmdLectureSearch),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            EventAdd(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventList(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventSearch(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventRemove(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventNotify(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            LectureSearch(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut App) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut app = App::new(config).await?;

        f(&mut app).await?;

        app.close().await?;
        Ok(())
    }
}
