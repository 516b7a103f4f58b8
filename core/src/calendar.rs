// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Week and month views over event occurrences.

use std::collections::BTreeMap;
use std::ops::Index;

use jiff::Span;
use jiff::civil::Date;

use crate::config::Config;
use crate::event::{EventRecord, Occurrence};
use crate::recurrence::{DateRange, expand_with_cap};
use crate::slot::Weekday;

/// The seven days containing `reference`, starting on `first_weekday`.
pub fn week_range(reference: Date, first_weekday: Weekday) -> DateRange {
    let offset = Weekday::from(reference.weekday()).days_since(first_weekday);
    let start = shift(reference, -i64::from(offset)).unwrap_or(Date::MIN);
    let end = shift(start, 6).unwrap_or(Date::MAX);
    DateRange::new(start, end)
}

/// The calendar month containing `reference`.
pub fn month_range(reference: Date) -> DateRange {
    DateRange::new(reference.first_of_month(), reference.last_of_month())
}

/// Occurrences of one week grouped by weekday, iterated from the first
/// weekday of the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBuckets {
    first_weekday: Weekday,
    days: [Vec<Occurrence>; 7],
}

impl WeekBuckets {
    /// Empty buckets for a week starting on `first_weekday`.
    pub fn new(first_weekday: Weekday) -> Self {
        Self {
            first_weekday,
            days: Default::default(),
        }
    }

    /// The day the week starts on.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The occurrences on `day`, if any.
    pub fn get(&self, day: &Weekday) -> Option<&Vec<Occurrence>> {
        Some(&self.days[self.position(*day)]).filter(|list| !list.is_empty())
    }

    /// Whether `day` has any occurrence.
    pub fn contains_key(&self, day: &Weekday) -> bool {
        self.get(day).is_some()
    }

    /// Non-empty buckets in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &Vec<Occurrence>)> {
        let first = self.first_weekday.to_monday_zero_offset();
        self.days
            .iter()
            .enumerate()
            .filter(|(_, list)| !list.is_empty())
            .map(move |(i, list)| (day_at(first, i), list))
    }

    /// Weekdays that have occurrences, in week order.
    pub fn keys(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.iter().map(|(day, _)| day)
    }

    /// Non-empty buckets in week order, without their weekday.
    pub fn values(&self) -> impl Iterator<Item = &Vec<Occurrence>> {
        self.iter().map(|(_, list)| list)
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.days.iter().filter(|list| !list.is_empty()).count()
    }

    /// Whether no day has an occurrence.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, occurrence: Occurrence) {
        let i = self.position(occurrence.concrete_date.weekday().into());
        self.days[i].push(occurrence);
    }

    fn position(&self, day: Weekday) -> usize {
        day.days_since(self.first_weekday) as usize
    }
}

/// The weekday `i` days after the one at Monday-based offset `first`.
fn day_at(first: i8, i: usize) -> Weekday {
    Weekday::from_monday_zero_offset(i64::from(first) + i as i64)
}

impl Index<&Weekday> for WeekBuckets {
    type Output = Vec<Occurrence>;

    fn index(&self, day: &Weekday) -> &Self::Output {
        &self.days[self.position(*day)]
    }
}

impl IntoIterator for WeekBuckets {
    type Item = (Weekday, Vec<Occurrence>);
    type IntoIter = Box<dyn Iterator<Item = Self::Item>>;

    fn into_iter(self) -> Self::IntoIter {
        let first = self.first_weekday.to_monday_zero_offset();
        Box::new(
            self.days
                .into_iter()
                .enumerate()
                .filter(|(_, list)| !list.is_empty())
                .map(move |(i, list)| (day_at(first, i), list)),
        )
    }
}

impl<'a> IntoIterator for &'a WeekBuckets {
    type Item = (Weekday, &'a Vec<Occurrence>);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Groups the occurrences that fall in the week of `reference` by weekday.
///
/// Buckets iterate from `first_weekday`. Occurrences keep their input order
/// inside each bucket; days without occurrences have no bucket.
pub fn buckets_for_week(
    occurrences: impl IntoIterator<Item = Occurrence>,
    reference: Date,
    first_weekday: Weekday,
) -> WeekBuckets {
    let range = week_range(reference, first_weekday);
    let mut buckets = WeekBuckets::new(first_weekday);
    for o in occurrences {
        if range.contains(o.concrete_date) {
            buckets.push(o);
        }
    }
    buckets
}

/// Groups the occurrences that fall in the month of `reference` by day of month.
pub fn buckets_for_month(
    occurrences: impl IntoIterator<Item = Occurrence>,
    reference: Date,
) -> BTreeMap<i8, Vec<Occurrence>> {
    let range = month_range(reference);
    let mut buckets: BTreeMap<i8, Vec<Occurrence>> = BTreeMap::new();
    for o in occurrences {
        if range.contains(o.concrete_date) {
            buckets.entry(o.concrete_date.day()).or_default().push(o);
        }
    }
    buckets
}

/// Total number of occurrences across all buckets.
pub fn bucket_len<'a, K>(buckets: impl IntoIterator<Item = (K, &'a Vec<Occurrence>)>) -> usize {
    buckets.into_iter().map(|(_, list)| list.len()).sum()
}

/// Expands the events over the week of `reference` and buckets them.
pub fn week_view(
    events: &[EventRecord],
    reference: Date,
    config: &Config,
) -> WeekBuckets {
    let range = week_range(reference, config.first_weekday);
    let occurrences = occurrences_within(events, range, config.recurrence_cap);
    buckets_for_week(occurrences, reference, config.first_weekday)
}

/// Expands the events over the month of `reference` and buckets them.
pub fn month_view(
    events: &[EventRecord],
    reference: Date,
    config: &Config,
) -> BTreeMap<i8, Vec<Occurrence>> {
    let range = month_range(reference);
    let occurrences = occurrences_within(events, range, config.recurrence_cap);
    buckets_for_month(occurrences, reference)
}

fn occurrences_within(events: &[EventRecord], range: DateRange, cap: usize) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    for event in events {
        match expand_with_cap(event, range, cap) {
            Ok(iter) => occurrences.extend(iter),
            Err(err) => tracing::warn!(id = %event.id, %err, "skip event in calendar view"),
        }
    }
    occurrences
}

fn shift(date: Date, days: i64) -> Option<Date> {
    date.checked_add(Span::new().try_days(days).ok()?).ok()
}
