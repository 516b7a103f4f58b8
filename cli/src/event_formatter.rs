// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::Color;
use timetab_core::{EventRecord, Occurrence, RepeatKind, format_time};

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [&'a EventRecord]) -> impl fmt::Display + 'a {
        Table::new(self.format, &self.columns, events)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Id,
    Date,
    TimeRange,
    Title,
    Location,
    Repeat,
    Notification,
}

impl<'e> TableColumn<&'e EventRecord> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Date => "Date",
            Self::TimeRange => "Time",
            Self::Title => "Title",
            Self::Location => "Location",
            Self::Repeat => "Repeat",
            Self::Notification => "Notify",
        }
        .into()
    }

    fn format<'a>(&self, event: &'a &'e EventRecord) -> Cow<'a, str> {
        match self {
            Self::Id => event.id.as_str().into(),
            Self::Date => event.date.to_string().into(),
            Self::TimeRange => time_range(event.start_time, event.end_time).into(),
            Self::Title => event.title.as_str().into(),
            Self::Location => event.location.as_str().into(),
            Self::Repeat => match event.repeat.kind {
                _ if !event.is_repeating() => "".into(),
                RepeatKind::Daily => format!("every {}d", event.repeat.interval).into(),
                RepeatKind::Weekly => format!("every {}w", event.repeat.interval).into(),
                RepeatKind::Monthly => format!("every {}m", event.repeat.interval).into(),
                kind => kind.to_string().into(),
            },
            Self::Notification => format!("{}m", event.notification_time).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id | Self::Notification => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, event: &&'e EventRecord) -> Option<Color> {
        match self {
            Self::Repeat if event.is_repeating() => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// An occurrence placed in a calendar bucket, joined with its event.
#[derive(Debug, Clone, Copy)]
pub struct AgendaRow<'a> {
    pub bucket: &'a str,
    pub occurrence: &'a Occurrence,
    pub event: Option<&'a EventRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgendaColumn {
    Bucket,
    Date,
    TimeRange,
    Id,
    Title,
}

impl AgendaColumn {
    pub const ALL: [AgendaColumn; 5] = [
        AgendaColumn::Bucket,
        AgendaColumn::Date,
        AgendaColumn::TimeRange,
        AgendaColumn::Id,
        AgendaColumn::Title,
    ];
}

impl<'r> TableColumn<AgendaRow<'r>> for AgendaColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Bucket => "Day",
            Self::Date => "Date",
            Self::TimeRange => "Time",
            Self::Id => "ID",
            Self::Title => "Title",
        }
        .into()
    }

    fn format<'a>(&self, row: &'a AgendaRow<'r>) -> Cow<'a, str> {
        match self {
            Self::Bucket => row.bucket.into(),
            Self::Date => row.occurrence.concrete_date.to_string().into(),
            Self::TimeRange => {
                time_range(row.occurrence.start_time, row.occurrence.end_time).into()
            }
            Self::Id => row.occurrence.source_event_id.as_str().into(),
            Self::Title => row.event.map_or("", |e| e.title.as_str()).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, row: &AgendaRow<'r>) -> Option<Color> {
        match self {
            Self::Bucket => Some(Color::Green),
            Self::Title if row.event.is_some_and(EventRecord::is_repeating) => Some(Color::Cyan),
            _ => None,
        }
    }
}

fn time_range(start: jiff::civil::Time, end: jiff::civil::Time) -> String {
    format!("{}~{}", format_time(start), format_time(end))
}
