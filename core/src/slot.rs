// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Weekdays, class periods and day schedules.

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::{self, Time, time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Day of the week, labelled the way timetables print them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// 월
    Monday,
    /// 화
    Tuesday,
    /// 수
    Wednesday,
    /// 목
    Thursday,
    /// 금
    Friday,
    /// 토
    Saturday,
    /// 일
    Sunday,
}

const LABEL_MONDAY: &str = "월";
const LABEL_TUESDAY: &str = "화";
const LABEL_WEDNESDAY: &str = "수";
const LABEL_THURSDAY: &str = "목";
const LABEL_FRIDAY: &str = "금";
const LABEL_SATURDAY: &str = "토";
const LABEL_SUNDAY: &str = "일";

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The single-character label used in schedule strings.
    pub const fn label(self) -> &'static str {
        match self {
            Weekday::Monday => LABEL_MONDAY,
            Weekday::Tuesday => LABEL_TUESDAY,
            Weekday::Wednesday => LABEL_WEDNESDAY,
            Weekday::Thursday => LABEL_THURSDAY,
            Weekday::Friday => LABEL_FRIDAY,
            Weekday::Saturday => LABEL_SATURDAY,
            Weekday::Sunday => LABEL_SUNDAY,
        }
    }

    /// Offset from Monday, in `0..7`.
    pub const fn to_monday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Inverse of [`Weekday::to_monday_zero_offset`], wrapping any integer into the week.
    pub fn from_monday_zero_offset(offset: i64) -> Self {
        Self::ALL[offset.rem_euclid(7) as usize]
    }

    /// Number of days from `start` forward to `self`, in `0..7`.
    pub fn days_since(self, start: Weekday) -> i8 {
        (self.to_monday_zero_offset() - start.to_monday_zero_offset()).rem_euclid(7)
    }
}

impl From<civil::Weekday> for Weekday {
    fn from(value: civil::Weekday) -> Self {
        match value {
            civil::Weekday::Monday => Weekday::Monday,
            civil::Weekday::Tuesday => Weekday::Tuesday,
            civil::Weekday::Wednesday => Weekday::Wednesday,
            civil::Weekday::Thursday => Weekday::Thursday,
            civil::Weekday::Friday => Weekday::Friday,
            civil::Weekday::Saturday => Weekday::Saturday,
            civil::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

impl From<Weekday> for civil::Weekday {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Monday => civil::Weekday::Monday,
            Weekday::Tuesday => civil::Weekday::Tuesday,
            Weekday::Wednesday => civil::Weekday::Wednesday,
            Weekday::Thursday => civil::Weekday::Thursday,
            Weekday::Friday => civil::Weekday::Friday,
            Weekday::Saturday => civil::Weekday::Saturday,
            Weekday::Sunday => civil::Weekday::Sunday,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            LABEL_MONDAY => return Ok(Weekday::Monday),
            LABEL_TUESDAY => return Ok(Weekday::Tuesday),
            LABEL_WEDNESDAY => return Ok(Weekday::Wednesday),
            LABEL_THURSDAY => return Ok(Weekday::Thursday),
            LABEL_FRIDAY => return Ok(Weekday::Friday),
            LABEL_SATURDAY => return Ok(Weekday::Saturday),
            LABEL_SUNDAY => return Ok(Weekday::Sunday),
            _ => {}
        }

        match s.to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thursday" => Ok(Weekday::Thursday),
            "fri" | "friday" => Ok(Weekday::Friday),
            "sat" | "saturday" => Ok(Weekday::Saturday),
            "sun" | "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {s}")),
        }
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Start and end of every class period, indexed by `slot - 1`.
///
/// Day periods are 30 minutes; evening periods are 50 minutes with 5 minute breaks.
const PERIODS: [(Time, Time); 24] = [
    (time(9, 0, 0, 0), time(9, 30, 0, 0)),
    (time(9, 30, 0, 0), time(10, 0, 0, 0)),
    (time(10, 0, 0, 0), time(10, 30, 0, 0)),
    (time(10, 30, 0, 0), time(11, 0, 0, 0)),
    (time(11, 0, 0, 0), time(11, 30, 0, 0)),
    (time(11, 30, 0, 0), time(12, 0, 0, 0)),
    (time(12, 0, 0, 0), time(12, 30, 0, 0)),
    (time(12, 30, 0, 0), time(13, 0, 0, 0)),
    (time(13, 0, 0, 0), time(13, 30, 0, 0)),
    (time(13, 30, 0, 0), time(14, 0, 0, 0)),
    (time(14, 0, 0, 0), time(14, 30, 0, 0)),
    (time(14, 30, 0, 0), time(15, 0, 0, 0)),
    (time(15, 0, 0, 0), time(15, 30, 0, 0)),
    (time(15, 30, 0, 0), time(16, 0, 0, 0)),
    (time(16, 0, 0, 0), time(16, 30, 0, 0)),
    (time(16, 30, 0, 0), time(17, 0, 0, 0)),
    (time(17, 0, 0, 0), time(17, 30, 0, 0)),
    (time(17, 30, 0, 0), time(18, 0, 0, 0)),
    (time(18, 0, 0, 0), time(18, 50, 0, 0)),
    (time(18, 55, 0, 0), time(19, 45, 0, 0)),
    (time(19, 50, 0, 0), time(20, 40, 0, 0)),
    (time(20, 45, 0, 0), time(21, 35, 0, 0)),
    (time(21, 40, 0, 0), time(22, 30, 0, 0)),
    (time(22, 35, 0, 0), time(23, 25, 0, 0)),
];

/// A class period index, `1..=24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// The first period of the day.
    pub const FIRST: TimeSlot = TimeSlot(1);

    /// The last period of the day.
    pub const LAST: TimeSlot = TimeSlot(PERIODS.len() as u8);

    /// Creates a slot, rejecting indices outside the period table.
    pub fn new(index: i64) -> Result<Self, Error> {
        match u8::try_from(index) {
            Ok(n) if (Self::FIRST.0..=Self::LAST.0).contains(&n) => Ok(TimeSlot(n)),
            _ => Err(Error::InvalidSlot(index)),
        }
    }

    /// The 1-based period number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterates over every period in order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (Self::FIRST.0..=Self::LAST.0).map(TimeSlot)
    }

    /// Clock time the period starts at.
    pub fn start(self) -> Time {
        self.period().0
    }

    /// Clock time the period ends at.
    pub fn end(self) -> Time {
        self.period().1
    }

    /// Label such as `09:00~09:30`.
    pub fn label(self) -> String {
        let (start, end) = self.period();
        format!("{}~{}", start.strftime("%H:%M"), end.strftime("%H:%M"))
    }

    /// The period that is running at the given clock time, if any.
    pub fn containing(at: Time) -> Option<TimeSlot> {
        Self::all().find(|slot| slot.start() <= at && at < slot.end())
    }

    fn period(self) -> (Time, Time) {
        // constructors keep `self.0` within `1..=PERIODS.len()`
        PERIODS[usize::from(self.0) - 1]
    }
}

impl TryFrom<i64> for TimeSlot {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        TimeSlot::new(value)
    }
}

impl From<TimeSlot> for u8 {
    fn from(value: TimeSlot) -> Self {
        value.0
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weekday together with the ordered set of periods occupied on it.
///
/// The range is never empty and is kept strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDaySchedule")]
pub struct DaySchedule {
    /// Day of the week.
    pub day: Weekday,

    range: Vec<TimeSlot>,

    /// Lecture room, when the source names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl DaySchedule {
    /// Creates a schedule from any slots, sorting and deduplicating them.
    ///
    /// Returns `None` when no slot is given.
    pub fn new(day: Weekday, slots: impl IntoIterator<Item = TimeSlot>) -> Option<Self> {
        let mut range: Vec<TimeSlot> = slots.into_iter().collect();
        range.sort_unstable();
        range.dedup();
        (!range.is_empty()).then_some(Self {
            day,
            range,
            room: None,
        })
    }

    /// Creates a schedule covering `first..=last`.
    pub fn span(day: Weekday, first: TimeSlot, last: TimeSlot) -> Option<Self> {
        Self::new(day, (first.0..=last.0).map(TimeSlot))
    }

    /// Attaches a room name.
    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// The occupied periods, strictly increasing.
    pub fn range(&self) -> &[TimeSlot] {
        &self.range
    }

    /// Whether the given period is occupied.
    pub fn contains(&self, slot: TimeSlot) -> bool {
        self.range.binary_search(&slot).is_ok()
    }

    /// Whether both schedules fall on the same day and share at least one period.
    pub fn overlaps(&self, other: &DaySchedule) -> bool {
        self.day == other.day && ranges_intersect(&self.range, &other.range)
    }

    /// Clock time from the start of the first period to the end of the last one.
    pub fn time_span(&self) -> Option<(Time, Time)> {
        let first = self.range.first()?;
        let last = self.range.last()?;
        Some((first.start(), last.end()))
    }
}

/// Set intersection test over two strictly increasing slot lists.
pub(crate) fn ranges_intersect(a: &[TimeSlot], b: &[TimeSlot]) -> bool {
    let (mut i, mut j) = (0, 0);
    while let (Some(x), Some(y)) = (a.get(i), b.get(j)) {
        match x.cmp(y) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => return true,
        }
    }
    false
}

#[derive(Deserialize)]
struct RawDaySchedule {
    day: Weekday,
    range: Vec<TimeSlot>,
    #[serde(default)]
    room: Option<String>,
}

impl TryFrom<RawDaySchedule> for DaySchedule {
    type Error = String;

    fn try_from(raw: RawDaySchedule) -> Result<Self, Self::Error> {
        let mut schedule = DaySchedule::new(raw.day, raw.range)
            .ok_or_else(|| format!("empty range for {}", raw.day))?;
        schedule.room = raw.room;
        Ok(schedule)
    }
}
