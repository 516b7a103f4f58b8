// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::slot::{DaySchedule, TimeSlot, Weekday};
use crate::util::string_or_number;

/// A course offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LectureRecord {
    /// Course code.
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,

    /// Course name.
    pub title: String,

    /// Credit string, e.g. `3`, `3(2)` or `3학점`.
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub credits: String,

    /// School year the course targets.
    pub grade: u8,

    /// Owning major; several majors are joined with `<p>`.
    pub major: String,

    /// Raw schedule string, see [`parse_schedule`].
    #[serde(default)]
    pub schedule: String,
}

impl LectureRecord {
    /// Parsed schedule, empty when the string cannot be parsed.
    pub fn schedules(&self) -> Vec<DaySchedule> {
        match parse_schedule(&self.schedule) {
            Ok(schedules) => schedules,
            Err(err) => {
                tracing::debug!(id = %self.id, %err, "unparsable lecture schedule");
                Vec::new()
            }
        }
    }
}

/// A schedule string segment that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse schedule segment: {segment:?}")]
pub struct ScheduleParseError {
    /// The offending segment.
    pub segment: String,
}

/// Parses a schedule string such as `월1~3(공학관 101)<p>수4`.
///
/// Segments are separated by `<p>`; each is a weekday label, a start period,
/// an optional `~end` period and an optional room in parentheses. Blank
/// segments are ignored, so an empty string parses to no schedule.
///
/// # Errors
///
/// Returns [`ScheduleParseError`] for the first segment that does not match,
/// names a period outside the table, or ends before it starts.
pub fn parse_schedule(raw: &str) -> Result<Vec<DaySchedule>, ScheduleParseError> {
    raw.split("<p>")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            parse_segment(segment).ok_or_else(|| ScheduleParseError {
                segment: segment.to_string(),
            })
        })
        .collect()
}

fn parse_segment(segment: &str) -> Option<DaySchedule> {
    const RE: &str = r"^([월화수목금토일])\s*(\d+)(?:\s*~\s*(\d+))?\s*(?:\((.*)\))?$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let caps = re.captures(segment)?;
    let day: Weekday = caps.get(1)?.as_str().parse().ok()?;
    let first = parse_slot(caps.get(2)?.as_str())?;
    let last = match caps.get(3) {
        Some(m) => parse_slot(m.as_str())?,
        None => first,
    };

    let schedule = DaySchedule::span(day, first, last)?;
    Some(match caps.get(4).map(|m| m.as_str().trim()) {
        Some(room) if !room.is_empty() => schedule.with_room(room),
        _ => schedule,
    })
}

fn parse_slot(digits: &str) -> Option<TimeSlot> {
    TimeSlot::new(digits.parse().ok()?).ok()
}
