// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use timetab_core::{DaySchedule, LectureRecord};

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct LectureFormatter {
    columns: Vec<LectureColumn>,
    format: OutputFormat,
}

impl LectureFormatter {
    pub fn new(verbose: bool) -> Self {
        let columns = if verbose {
            LectureColumn::ALL.to_vec()
        } else {
            vec![
                LectureColumn::Id,
                LectureColumn::Title,
                LectureColumn::Schedule,
            ]
        };
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, lectures: &'a [&'a LectureRecord]) -> impl fmt::Display + 'a {
        Table::new(self.format, &self.columns, lectures)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LectureColumn {
    Id,
    Title,
    Credits,
    Grade,
    Major,
    Schedule,
}

impl LectureColumn {
    pub const ALL: [LectureColumn; 6] = [
        LectureColumn::Id,
        LectureColumn::Title,
        LectureColumn::Credits,
        LectureColumn::Grade,
        LectureColumn::Major,
        LectureColumn::Schedule,
    ];
}

impl<'l> TableColumn<&'l LectureRecord> for LectureColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Credits => "Credits",
            Self::Grade => "Grade",
            Self::Major => "Major",
            Self::Schedule => "Schedule",
        }
        .into()
    }

    fn format<'a>(&self, lecture: &'a &'l LectureRecord) -> Cow<'a, str> {
        match self {
            Self::Id => lecture.id.as_str().into(),
            Self::Title => lecture.title.as_str().into(),
            Self::Credits => lecture.credits.as_str().into(),
            Self::Grade => lecture.grade.to_string().into(),
            Self::Major => lecture.major.replace("<p>", ", ").into(),
            Self::Schedule => format_schedules(&lecture.schedules()).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            Self::Grade => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}

/// Renders schedules the way the catalog writes them, e.g. `월1~3 수1~3`.
fn format_schedules(schedules: &[DaySchedule]) -> String {
    schedules
        .iter()
        .filter_map(|s| {
            let (first, last) = (s.range().first()?, s.range().last()?);
            let span = if first == last {
                format!("{}{}", s.day, first)
            } else {
                format!("{}{}~{}", s.day, first, last)
            };
            Some(match &s.room {
                Some(room) => format!("{span}({room})"),
                None => span,
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
