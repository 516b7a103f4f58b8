// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use jiff::civil::{Date, DateTime};
use timetab_core::{
    Error as CoreError, EventDraft, EventRecord, Occurrence, RepeatKind, RepeatRule,
    SearchOptions, month_view, week_view,
};

use crate::app::App;
use crate::arg::{CommonArgs, EventArgs, SearchArgs};
use crate::event_formatter::{AgendaColumn, AgendaRow, EventColumn, EventFormatter};
use crate::table::Table;
use crate::util::{OutputFormat, parse_date, parse_datetime};

#[derive(Debug, Clone)]
pub struct CmdEventAdd {
    pub draft: EventDraft,
    pub force: bool,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Add a new event, refusing ones that overlap existing events")
            .arg(EventArgs::title())
            .arg(EventArgs::date())
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::description())
            .arg(EventArgs::location())
            .arg(EventArgs::category())
            .arg(EventArgs::repeat())
            .arg(EventArgs::interval())
            .arg(EventArgs::notify())
            .arg(arg!(-f --force "Add the event even if it overlaps others"))
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let mut draft = EventDraft::new(
            EventArgs::get_title(matches),
            EventArgs::get_date(matches),
            EventArgs::get_start(matches),
            EventArgs::get_end(matches),
        );
        draft.description = EventArgs::get_text(matches, "description");
        draft.location = EventArgs::get_text(matches, "location");
        draft.category = EventArgs::get_text(matches, "category");
        draft.notification_time = EventArgs::get_notify(matches);
        draft.repeat = match EventArgs::get_repeat(matches) {
            RepeatKind::None => RepeatRule::once(),
            kind => RepeatRule::every(kind, EventArgs::get_interval(matches)),
        };

        Self {
            draft,
            force: matches.get_flag("force"),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let result = if self.force {
            app.book_mut().add_unchecked(self.draft)
        } else {
            app.book_mut().add(self.draft)
        };

        match result {
            Ok(event) => {
                let event = event.clone();
                print_events(&[&event], self.output_format, self.verbose);
                Ok(())
            }
            Err(CoreError::Conflict { ids }) => {
                let conflicts: Vec<&EventRecord> =
                    ids.iter().filter_map(|id| app.book().get(id)).collect();
                if self.output_format == OutputFormat::Table {
                    println!("{}", "Overlaps with:".yellow());
                }
                print_events(&conflicts, self.output_format, self.verbose);
                Err("The event overlaps existing events, use --force to add it anyway".into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRange {
    Week(Option<Date>),
    Month(Option<Date>),
}

#[derive(Debug, Clone, Copy)]
pub struct CmdEventList {
    pub range: ListRange,
    pub output_format: OutputFormat,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List the events of a week or a month")
            .arg(
                arg!(-w --week [DATE] "Week containing DATE, defaults to today")
                    .value_parser(parse_date)
                    .conflicts_with("month"),
            )
            .arg(arg!(-m --month [DATE] "Month containing DATE").value_parser(parse_date))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let range = if matches.contains_id("month") && matches.value_source("month").is_some() {
            ListRange::Month(matches.get_one("month").copied())
        } else {
            ListRange::Week(matches.get_one("week").copied())
        };
        Self {
            range,
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let today = app.now().date();
        let events = app.book().events();
        let core = &app.config().core;

        let buckets: Vec<(String, Vec<Occurrence>)> = match self.range {
            ListRange::Week(reference) => week_view(events, reference.unwrap_or(today), core)
                .into_iter()
                .map(|(day, list)| (day.to_string(), list))
                .collect(),
            ListRange::Month(reference) => month_view(events, reference.unwrap_or(today), core)
                .into_iter()
                .map(|(day, list)| (format!("{day:02}"), list))
                .collect(),
        };

        let rows: Vec<AgendaRow<'_>> = buckets
            .iter()
            .flat_map(|(label, list)| {
                list.iter().map(|occurrence| AgendaRow {
                    bucket: label,
                    occurrence,
                    event: app.book().get(&occurrence.source_event_id),
                })
            })
            .collect();

        if rows.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        println!("{}", Table::new(self.output_format, &AgendaColumn::ALL, &rows));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventSearch {
    pub options: SearchOptions,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventSearch {
    pub const NAME: &str = "search";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Search events by title, description or location")
            .arg(SearchArgs::query())
            .arg(SearchArgs::day())
            .arg(SearchArgs::time())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            options: SearchArgs::get_options(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "searching events...");
        let events = app.book().search(&self.options);
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(&events, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventRemove {
    pub ids: Vec<String>,
    pub output_format: OutputFormat,
}

impl CmdEventRemove {
    pub const NAME: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Remove events")
            .arg(arg!(id: <ID> "The id of the event to remove").num_args(1..))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let ids = matches
            .get_many::<String>("id")
            .expect("id is required")
            .cloned()
            .collect();
        Self {
            ids,
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "removing events...");
        let mut removed = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            removed.push(app.book_mut().remove(id)?);
        }

        let removed: Vec<&EventRecord> = removed.iter().collect();
        print_events(&removed, self.output_format, false);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNotify {
    pub at: Option<String>,
    pub skip: Vec<String>,
    pub output_format: OutputFormat,
}

impl CmdEventNotify {
    pub const NAME: &str = "notify";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show reminders that are due")
            .arg(arg!(--at <DATETIME> "Check at this time (YYYY-MM-DD HH:MM or HH:MM), defaults to now"))
            .arg(
                arg!(--skip <ID> "Events already notified, may repeat")
                    .action(clap::ArgAction::Append),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            at: matches.get_one("at").cloned(),
            skip: matches
                .get_many::<String>("skip")
                .map(|ids| ids.cloned().collect())
                .unwrap_or_default(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking reminders...");
        let now: DateTime = match &self.at {
            Some(at) => parse_datetime(app.now().date(), at)?,
            None => app.now(),
        };
        let notified: HashSet<String> = self.skip.into_iter().collect();
        let reminders = app.book().due_notifications(now, &notified);

        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminders)?),
            OutputFormat::Table if reminders.is_empty() => {
                println!("{}", "No reminders due".italic());
            }
            OutputFormat::Table => {
                for reminder in &reminders {
                    println!("{} {}", "⏰".bold(), reminder.message());
                }
            }
        }
        Ok(())
    }
}

fn print_events(events: &[&EventRecord], output_format: OutputFormat, verbose: bool) {
    let columns = if verbose {
        vec![
            EventColumn::Id,
            EventColumn::Date,
            EventColumn::TimeRange,
            EventColumn::Title,
            EventColumn::Location,
            EventColumn::Repeat,
            EventColumn::Notification,
        ]
    } else {
        vec![
            EventColumn::Id,
            EventColumn::Date,
            EventColumn::TimeRange,
            EventColumn::Title,
        ]
    };
    let formatter = EventFormatter::new(columns).with_output_format(output_format);
    println!("{}", formatter.format(events));
}
