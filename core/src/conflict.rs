// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Overlap checks run before an entry is committed.

use std::collections::BTreeMap;

use jiff::Span;
use jiff::civil::Date;

use crate::error::Error;
use crate::event::{EventRecord, Occurrence};
use crate::recurrence::{DateRange, expand};
use crate::slot::DaySchedule;
use crate::timetable::ScheduleEntry;

/// Returns every existing entry that shares a `(day, slot)` pair with the
/// candidate, in the order they appear in `existing`.
///
/// Back-to-back ranges such as `1~3` and `4~6` do not conflict.
pub fn detect<'a, S>(
    candidate: &[DaySchedule],
    existing: &'a [ScheduleEntry<S>],
) -> Vec<&'a ScheduleEntry<S>> {
    existing
        .iter()
        .filter(|entry| candidate.iter().any(|c| c.overlaps(&entry.schedule)))
        .collect()
}

/// Returns the existing events with an occurrence that overlaps an occurrence
/// of the candidate, looking `horizon_days` ahead of the candidate's date.
///
/// An existing event with the candidate's id is ignored. Existing events that
/// cannot be expanded are logged and skipped.
///
/// # Errors
///
/// Returns an error when the candidate itself is invalid or cannot be expanded.
#[tracing::instrument(level = "debug", skip_all, fields(candidate = %candidate.id))]
pub fn overlapping_events<'a>(
    candidate: &EventRecord,
    existing: &'a [EventRecord],
    horizon_days: i64,
) -> Result<Vec<&'a EventRecord>, Error> {
    candidate.validate()?;

    let within = DateRange::new(candidate.date, horizon_end(candidate.date, horizon_days));
    let mut occupied: BTreeMap<Date, Vec<Occurrence>> = BTreeMap::new();
    for occurrence in expand(candidate, within)? {
        occupied
            .entry(occurrence.concrete_date)
            .or_default()
            .push(occurrence);
    }

    let mut conflicts = Vec::new();
    for event in existing {
        if event.id == candidate.id {
            continue;
        }

        let occurrences = match expand(event, within) {
            Ok(occurrences) => occurrences,
            Err(err) => {
                tracing::warn!(id = %event.id, %err, "skip event that cannot be expanded");
                continue;
            }
        };

        let mut occurrences = occurrences;
        let hit = occurrences.any(|o| {
            occupied
                .get(&o.concrete_date)
                .is_some_and(|taken| taken.iter().any(|c| c.overlaps(&o)))
        });
        if hit {
            tracing::debug!(id = %event.id, "conflicting event");
            conflicts.push(event);
        }
    }
    Ok(conflicts)
}

fn horizon_end(start: Date, horizon_days: i64) -> Date {
    Span::new()
        .try_days(horizon_days.max(0))
        .ok()
        .and_then(|span| start.checked_add(span).ok())
        .unwrap_or(Date::MAX)
}
