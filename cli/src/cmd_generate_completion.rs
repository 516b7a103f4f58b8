// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt, fs::File, io, path::PathBuf, str::FromStr};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use clap_complete::{Shell as ClapShell, generate};
use clap_complete_nushell::Nushell;

use crate::Cli;

#[derive(Debug, Clone)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
    pub output: Option<PathBuf>,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the completion script for a shell")
            .arg(
                arg!(shell: <SHELL> "bash, elvish, fish, nushell, powershell or zsh")
                    .value_parser(|s: &str| s.parse::<Shell>()),
            )
            .arg(
                arg!(-o --output <FILE> "Write the script to FILE instead of stdout")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            shell: *matches.get_one::<Shell>("shell").expect("shell is required"),
            output: matches.get_one("output").cloned(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        match &self.output {
            Some(path) => {
                let mut file = File::create(path)
                    .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
                self.shell.generate(&mut file);
            }
            None => self.shell.generate(&mut io::stdout()),
        }
        Ok(())
    }
}

/// A shell supported by `clap_complete`, or nushell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Builtin(ClapShell),
    Nushell,
}

impl Shell {
    pub fn generate(self, buf: &mut impl io::Write) {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        match self {
            Shell::Builtin(shell) => generate(shell, &mut cmd, name, buf),
            Shell::Nushell => generate(Nushell {}, &mut cmd, name, buf),
        }
    }
}

impl FromStr for Shell {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nu" | "nushell" => Ok(Shell::Nushell),
            other => other
                .parse::<ClapShell>()
                .map(Shell::Builtin)
                .map_err(|_| format!("Unsupported shell: {s}")),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Builtin(shell) => write!(f, "{shell}"),
            Shell::Nushell => write!(f, "nushell"),
        }
    }
}
