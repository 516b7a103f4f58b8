// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Conflict detection, recurrence expansion, calendar bucketing and search for
//! events and course timetables.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

mod calendar;
mod config;
mod conflict;
mod error;
mod event;
mod event_book;
mod lecture;
mod notification;
mod recurrence;
mod search;
mod slot;
mod timetable;
mod util;

pub use crate::calendar::{
    WeekBuckets, bucket_len, buckets_for_month, buckets_for_week, month_range, month_view,
    week_range, week_view,
};
pub use crate::config::{
    APP_NAME, Config, DEFAULT_CONFLICT_HORIZON_DAYS, EVENTS_FILE, expand_path, get_config_dir,
};
pub use crate::conflict::{detect, overlapping_events};
pub use crate::error::Error;
pub use crate::event::{EventDraft, EventPatch, EventRecord, Occurrence, RepeatKind, RepeatRule};
pub use crate::event_book::EventBook;
pub use crate::lecture::{LectureRecord, ScheduleParseError, parse_schedule};
pub use crate::notification::{Reminder, due_notifications};
pub use crate::recurrence::{
    DEFAULT_RECURRENCE_CAP, DateRange, Occurrences, expand, expand_with_cap,
};
pub use crate::search::{
    DEFAULT_PAGE_SIZE, SearchOptions, SearchSession, Searchable, filter, paginate,
};
pub use crate::slot::{DaySchedule, TimeSlot, Weekday};
pub use crate::timetable::{ScheduleEntry, Subject, Timetable, Timetables};
pub use crate::util::format_time;
