// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for timetab: events with conflict checks, calendar
//! views, reminders and lecture catalog search.

mod app;
mod arg;
mod cli;
mod cmd_event;
mod cmd_generate_completion;
mod cmd_lecture;
mod config;
mod event_formatter;
mod lecture_formatter;
mod store;
mod table;
mod util;

pub use crate::app::App;
pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, TIMETAB_CONFIG_ENV, parse_config};
pub use crate::store::{load_events, save_events};
