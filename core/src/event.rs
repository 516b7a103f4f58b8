// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::{Date, DateTime, Time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::util::{format_time, hhmm, string_or_number};

/// How often a repeating event comes back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RepeatKind {
    /// The event does not repeat.
    #[default]
    None,

    /// Every `interval` days.
    Daily,

    /// Every `interval` weeks, on the same weekday.
    Weekly,

    /// Every `interval` months, on the same day of month.
    Monthly,

    /// A repeat type this engine does not know how to expand.
    #[cfg_attr(feature = "clap", clap(skip))]
    Unsupported,
}

const KIND_NONE: &str = "none";
const KIND_DAILY: &str = "daily";
const KIND_WEEKLY: &str = "weekly";
const KIND_MONTHLY: &str = "monthly";
const KIND_UNSUPPORTED: &str = "unsupported";

impl AsRef<str> for RepeatKind {
    fn as_ref(&self) -> &str {
        match self {
            RepeatKind::None => KIND_NONE,
            RepeatKind::Daily => KIND_DAILY,
            RepeatKind::Weekly => KIND_WEEKLY,
            RepeatKind::Monthly => KIND_MONTHLY,
            RepeatKind::Unsupported => KIND_UNSUPPORTED,
        }
    }
}

impl Display for RepeatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for RepeatKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            KIND_NONE => Ok(RepeatKind::None),
            KIND_DAILY => Ok(RepeatKind::Daily),
            KIND_WEEKLY => Ok(RepeatKind::Weekly),
            KIND_MONTHLY => Ok(RepeatKind::Monthly),
            _ => Err(format!("Unknown repeat type: {value}")),
        }
    }
}

impl Serialize for RepeatKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for RepeatKind {
    /// Unknown types are kept as [`RepeatKind::Unsupported`] so that expansion,
    /// not parsing, is where the event gets rejected.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_else(|_| {
            tracing::debug!(repeat_type = %s, "unsupported repeat type");
            RepeatKind::Unsupported
        }))
    }
}

/// Repeat rule attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatRule {
    /// Whether the event repeats at all.
    pub is_repeating: bool,

    /// The repeat cadence.
    #[serde(rename = "type")]
    pub kind: RepeatKind,

    /// Number of cadence units between occurrences.
    pub interval: i32,
}

impl Default for RepeatRule {
    fn default() -> Self {
        Self::once()
    }
}

impl RepeatRule {
    /// A rule for an event that happens once.
    pub const fn once() -> Self {
        Self {
            is_repeating: false,
            kind: RepeatKind::None,
            interval: 1,
        }
    }

    /// A repeating rule with the given cadence and interval.
    pub const fn every(kind: RepeatKind, interval: i32) -> Self {
        Self {
            is_repeating: true,
            kind,
            interval,
        }
    }

    /// Checks that the rule can be expanded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecurrence`] when the interval is not positive, the
    /// type is unsupported, or a repeating rule has no type.
    pub fn validate(&self) -> Result<(), Error> {
        if self.interval <= 0 {
            return Err(Error::InvalidRecurrence(format!(
                "interval must be positive, got {}",
                self.interval
            )));
        }

        match (self.is_repeating, self.kind) {
            (_, RepeatKind::Unsupported) => Err(Error::InvalidRecurrence(
                "unsupported repeat type".to_string(),
            )),
            (true, RepeatKind::None) => Err(Error::InvalidRecurrence(
                "repeating event without a repeat type".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// A calendar event as exchanged with the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Unique identifier of the event.
    #[serde(deserialize_with = "string_or_number::deserialize")]
    pub id: String,

    /// Title shown in lists and dialogs.
    pub title: String,

    /// Base date of the event.
    pub date: Date,

    /// Start clock time.
    #[serde(with = "hhmm")]
    pub start_time: Time,

    /// End clock time.
    #[serde(with = "hhmm")]
    pub end_time: Time,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// Where the event takes place.
    #[serde(default)]
    pub location: String,

    /// User-defined category, e.g. work or family.
    #[serde(default)]
    pub category: String,

    /// Repeat rule.
    #[serde(default)]
    pub repeat: RepeatRule,

    /// Minutes before the start at which a reminder is due.
    #[serde(default)]
    pub notification_time: i64,
}

impl EventRecord {
    /// Checks the time range and the repeat rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeRange`] when the end is not after the start,
    /// or [`Error::InvalidRecurrence`] when the repeat rule is invalid.
    pub fn validate(&self) -> Result<(), Error> {
        if self.end_time <= self.start_time {
            return Err(Error::InvalidTimeRange {
                start: format_time(self.start_time),
                end: format_time(self.end_time),
            });
        }
        self.repeat.validate()
    }

    /// Whether the event generates more than its base occurrence.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_repeating
    }

    /// The occurrence on the base date.
    pub fn base_occurrence(&self) -> Occurrence {
        self.occurrence_on(self.date)
    }

    /// The occurrence of this event on the given date.
    pub fn occurrence_on(&self, date: Date) -> Occurrence {
        Occurrence {
            source_event_id: self.id.clone(),
            concrete_date: date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// One concrete dated instance of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Identifier of the event this occurrence belongs to.
    pub source_event_id: String,

    /// Date of this occurrence.
    pub concrete_date: Date,

    /// Start clock time.
    #[serde(with = "hhmm")]
    pub start_time: Time,

    /// End clock time.
    #[serde(with = "hhmm")]
    pub end_time: Time,
}

impl Occurrence {
    /// Date and time this occurrence starts at.
    pub fn start(&self) -> DateTime {
        self.concrete_date.to_datetime(self.start_time)
    }

    /// Date and time this occurrence ends at.
    pub fn end(&self) -> DateTime {
        self.concrete_date.to_datetime(self.end_time)
    }

    /// Whether the two half-open `[start, end)` intervals intersect on the same date.
    pub fn overlaps(&self, other: &Occurrence) -> bool {
        self.concrete_date == other.concrete_date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

/// Draft for an event, used for creating new events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Title of the event.
    pub title: String,

    /// Base date.
    pub date: Date,

    /// Start clock time.
    pub start_time: Time,

    /// End clock time.
    pub end_time: Time,

    /// Free-form description.
    pub description: String,

    /// Location.
    pub location: String,

    /// Category.
    pub category: String,

    /// Repeat rule.
    pub repeat: RepeatRule,

    /// Reminder lead time in minutes.
    pub notification_time: i64,
}

impl EventDraft {
    /// Creates a draft with the required fields and a ten minute reminder.
    pub fn new(title: impl Into<String>, date: Date, start_time: Time, end_time: Time) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatRule::once(),
            notification_time: 10,
        }
    }

    /// Turns the draft into a record with the given identifier.
    pub(crate) fn into_record(self, id: String) -> EventRecord {
        EventRecord {
            id,
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            location: self.location,
            category: self.category,
            repeat: self.repeat,
            notification_time: self.notification_time,
        }
    }
}

/// Patch for an event, allowing partial updates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventPatch {
    /// New title.
    pub title: Option<String>,

    /// New base date.
    pub date: Option<Date>,

    /// New start time.
    pub start_time: Option<Time>,

    /// New end time.
    pub end_time: Option<Time>,

    /// New description.
    pub description: Option<String>,

    /// New location.
    pub location: Option<String>,

    /// New category.
    pub category: Option<String>,

    /// New repeat rule.
    pub repeat: Option<RepeatRule>,

    /// New reminder lead time.
    pub notification_time: Option<i64>,
}

impl EventPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.repeat.is_none()
            && self.notification_time.is_none()
    }

    /// Returns a copy of the event with the patch applied.
    pub(crate) fn apply_to(&self, event: &EventRecord) -> EventRecord {
        let mut e = event.clone();
        if let Some(title) = &self.title {
            e.title.clone_from(title);
        }
        if let Some(date) = self.date {
            e.date = date;
        }
        if let Some(start) = self.start_time {
            e.start_time = start;
        }
        if let Some(end) = self.end_time {
            e.end_time = end;
        }
        if let Some(description) = &self.description {
            e.description.clone_from(description);
        }
        if let Some(location) = &self.location {
            e.location.clone_from(location);
        }
        if let Some(category) = &self.category {
            e.category.clone_from(category);
        }
        if let Some(repeat) = self.repeat {
            e.repeat = repeat;
        }
        if let Some(minutes) = self.notification_time {
            e.notification_time = minutes;
        }
        e
    }
}
