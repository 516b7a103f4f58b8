// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of repeat rules into dated occurrences.

use std::iter::FusedIterator;

use jiff::Span;
use jiff::civil::Date;

use crate::error::Error;
use crate::event::{EventRecord, Occurrence, RepeatKind};

/// Default upper bound on the number of occurrences a single expansion emits.
pub const DEFAULT_RECURRENCE_CAP: usize = 1000;

/// An inclusive range of dates, optionally open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First date of the range.
    pub start: Date,

    /// Last date of the range, `None` for an unbounded range.
    pub end: Option<Date>,
}

impl DateRange {
    /// Inclusive range `start..=end`.
    pub const fn new(start: Date, end: Date) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Open range starting at `start`.
    pub const fn from(start: Date) -> Self {
        Self { start, end: None }
    }

    /// Whether the date falls inside the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && self.end.is_none_or(|end| date <= end)
    }
}

/// Expands an event with the default safety cap.
///
/// # Errors
///
/// Returns [`Error::InvalidRecurrence`] when the repeat rule cannot be expanded.
pub fn expand(event: &EventRecord, within: DateRange) -> Result<Occurrences<'_>, Error> {
    expand_with_cap(event, within, DEFAULT_RECURRENCE_CAP)
}

/// Expands an event into the occurrences that fall inside `within`.
///
/// A non-repeating event always yields its base occurrence; the window only
/// bounds repeat steps. At most `cap` occurrences are emitted.
///
/// # Errors
///
/// Returns [`Error::InvalidRecurrence`] when the repeat rule cannot be expanded.
pub fn expand_with_cap(
    event: &EventRecord,
    within: DateRange,
    cap: usize,
) -> Result<Occurrences<'_>, Error> {
    event.repeat.validate()?;

    let interval = i64::from(event.repeat.interval);
    let step = match (event.repeat.is_repeating, event.repeat.kind) {
        (false, _) => Step::Once,
        (true, RepeatKind::Daily) => Step::Days(interval),
        (true, RepeatKind::Weekly) => Step::Days(interval * 7),
        (true, RepeatKind::Monthly) => Step::Months(interval),
        (true, RepeatKind::None | RepeatKind::Unsupported) => {
            return Err(Error::InvalidRecurrence(format!(
                "cannot expand repeat type {}",
                event.repeat.kind
            )));
        }
    };

    Ok(Occurrences {
        event,
        step,
        index: first_index(event.date, within.start, step),
        within,
        remaining: cap,
    })
}

/// Lazy, restartable sequence of occurrences produced by [`expand`].
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    event: &'a EventRecord,
    step: Step,
    index: i64,
    within: DateRange,
    remaining: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Once,
    Days(i64),
    Months(i64),
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.remaining == 0 {
                return None;
            }

            let date = match self.step {
                Step::Once => {
                    self.remaining = 0;
                    return Some(self.event.base_occurrence());
                }
                Step::Days(days) => {
                    let date = self
                        .index
                        .checked_mul(days)
                        .and_then(|n| add_days(self.event.date, n));
                    match date {
                        Some(date) => date,
                        None => return self.finish(),
                    }
                }
                Step::Months(months) => {
                    let Some(offset) = self.index.checked_mul(months) else {
                        return self.finish();
                    };
                    match month_step(self.event.date, offset) {
                        MonthStep::Date(date) => date,
                        MonthStep::Missing => {
                            self.index += 1;
                            continue;
                        }
                        MonthStep::OutOfRange => return self.finish(),
                    }
                }
            };
            self.index += 1;

            if date < self.within.start {
                continue;
            }
            if self.within.end.is_some_and(|end| date > end) {
                return self.finish();
            }

            self.remaining -= 1;
            return Some(self.event.occurrence_on(date));
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

impl Occurrences<'_> {
    fn finish(&mut self) -> Option<Occurrence> {
        self.remaining = 0;
        None
    }
}

/// Index of the first step that may land on or after `start`.
fn first_index(base: Date, start: Date, step: Step) -> i64 {
    if start <= base {
        return 0;
    }

    match step {
        Step::Once => 0,
        Step::Days(days) => {
            let Ok(span) = base.until(start) else {
                return 0;
            };
            let elapsed = i64::from(span.get_days());
            // ceiling division, both operands are positive
            (elapsed + days - 1) / days
        }
        Step::Months(months) => {
            let elapsed = (i64::from(start.year()) - i64::from(base.year())) * 12
                + i64::from(start.month())
                - i64::from(base.month());
            // the step landing in the start month may still be before `start`,
            // the iterator skips it
            elapsed / months
        }
    }
}

fn add_days(base: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    base.checked_add(span).ok()
}

enum MonthStep {
    Date(Date),
    Missing,
    OutOfRange,
}

/// The date `offset` months after `base`, on the same day of month.
fn month_step(base: Date, offset: i64) -> MonthStep {
    let total = i64::from(base.year()) * 12 + i64::from(base.month()) - 1 + offset;
    let Ok(year) = i16::try_from(total.div_euclid(12)) else {
        return MonthStep::OutOfRange;
    };
    let Ok(month) = i8::try_from(total.rem_euclid(12) + 1) else {
        return MonthStep::OutOfRange;
    };
    if !(Date::MIN.year()..=Date::MAX.year()).contains(&year) {
        return MonthStep::OutOfRange;
    }

    match Date::new(year, month, base.day()) {
        Ok(date) => MonthStep::Date(date),
        Err(_) => MonthStep::Missing,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;
    use crate::event::RepeatRule;

    fn event(base: Date, repeat: RepeatRule) -> EventRecord {
        EventRecord {
            id: "1".to_string(),
            title: "주간 회의".to_string(),
            date: base,
            start_time: time(10, 0, 0, 0),
            end_time: time(11, 0, 0, 0),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat,
            notification_time: 10,
        }
    }

    fn dates(occurrences: Occurrences<'_>) -> Vec<Date> {
        occurrences.map(|o| o.concrete_date).collect()
    }

    #[test]
    fn non_repeating_yields_base_occurrence() {
        let e = event(date(2024, 7, 20), RepeatRule::once());
        let all: Vec<_> = expand(&e, DateRange::new(date(2024, 7, 1), date(2024, 7, 31)))
            .unwrap()
            .collect();
        assert_eq!(all, vec![e.base_occurrence()]);
        assert_eq!(all[0].start_time, time(10, 0, 0, 0));
        assert_eq!(all[0].end_time, time(11, 0, 0, 0));

        // the window only bounds repeat steps
        let outside = expand(&e, DateRange::new(date(2025, 1, 1), date(2025, 1, 31))).unwrap();
        assert_eq!(outside.count(), 1);
    }

    #[test]
    fn weekly_over_four_weeks() {
        let e = event(date(2024, 7, 1), RepeatRule::every(RepeatKind::Weekly, 1));
        let got = dates(expand(&e, DateRange::new(date(2024, 7, 1), date(2024, 7, 28))).unwrap());
        assert_eq!(
            got,
            vec![
                date(2024, 7, 1),
                date(2024, 7, 8),
                date(2024, 7, 15),
                date(2024, 7, 22)
            ]
        );
        for pair in got.windows(2) {
            assert_eq!(pair[0].until(pair[1]).unwrap().get_days(), 7);
        }
    }

    #[test]
    fn daily_with_interval_skips_to_window() {
        let e = event(date(2024, 1, 1), RepeatRule::every(RepeatKind::Daily, 3));
        let got = dates(expand(&e, DateRange::new(date(2024, 1, 9), date(2024, 1, 16))).unwrap());
        assert_eq!(
            got,
            vec![date(2024, 1, 10), date(2024, 1, 13), date(2024, 1, 16)]
        );
    }

    #[test]
    fn window_before_base_starts_at_base() {
        let e = event(date(2024, 7, 20), RepeatRule::every(RepeatKind::Daily, 1));
        let got = dates(expand(&e, DateRange::new(date(2024, 7, 1), date(2024, 7, 22))).unwrap());
        assert_eq!(
            got,
            vec![date(2024, 7, 20), date(2024, 7, 21), date(2024, 7, 22)]
        );
    }

    #[test]
    fn monthly_skips_months_without_the_day() {
        let e = event(date(2024, 1, 31), RepeatRule::every(RepeatKind::Monthly, 1));
        let got = dates(expand(&e, DateRange::new(date(2024, 1, 1), date(2024, 8, 31))).unwrap());
        assert_eq!(
            got,
            vec![
                date(2024, 1, 31),
                date(2024, 3, 31),
                date(2024, 5, 31),
                date(2024, 7, 31),
                date(2024, 8, 31)
            ]
        );
    }

    #[test]
    fn monthly_leap_day_only_in_leap_years() {
        let e = event(date(2024, 2, 29), RepeatRule::every(RepeatKind::Monthly, 12));
        let got = dates(expand(&e, DateRange::new(date(2024, 1, 1), date(2032, 12, 31))).unwrap());
        assert_eq!(
            got,
            vec![date(2024, 2, 29), date(2028, 2, 29), date(2032, 2, 29)]
        );
    }

    #[test]
    fn monthly_jump_lands_in_start_month() {
        let e = event(date(2024, 1, 15), RepeatRule::every(RepeatKind::Monthly, 2));
        let got = dates(expand(&e, DateRange::new(date(2024, 5, 20), date(2024, 12, 31))).unwrap());
        assert_eq!(
            got,
            vec![date(2024, 7, 15), date(2024, 9, 15), date(2024, 11, 15)]
        );
    }

    #[test]
    fn unbounded_window_stops_at_cap() {
        let e = event(date(2024, 1, 1), RepeatRule::every(RepeatKind::Daily, 1));
        let within = DateRange::from(date(2024, 1, 1));
        assert_eq!(expand(&e, within).unwrap().count(), DEFAULT_RECURRENCE_CAP);
        assert_eq!(expand_with_cap(&e, within, 5).unwrap().count(), 5);
    }

    #[test]
    fn expansion_is_restartable() {
        let e = event(date(2024, 7, 1), RepeatRule::every(RepeatKind::Weekly, 2));
        let within = DateRange::new(date(2024, 7, 1), date(2024, 9, 30));
        let first = expand(&e, within).unwrap();
        let again = first.clone();
        assert_eq!(dates(first), dates(again));
        assert_eq!(
            dates(expand(&e, within).unwrap()),
            dates(expand(&e, within).unwrap())
        );
    }

    #[test]
    fn rejects_invalid_rules() {
        let within = DateRange::from(date(2024, 1, 1));
        for rule in [
            RepeatRule::every(RepeatKind::Daily, 0),
            RepeatRule::every(RepeatKind::Weekly, -2),
            RepeatRule::every(RepeatKind::None, 1),
            RepeatRule::every(RepeatKind::Unsupported, 1),
        ] {
            let e = event(date(2024, 1, 1), rule);
            assert!(matches!(
                expand(&e, within),
                Err(Error::InvalidRecurrence(_))
            ));
        }
    }

    #[test]
    fn stops_at_end_of_calendar() {
        let e = event(date(9999, 12, 1), RepeatRule::every(RepeatKind::Daily, 7));
        let got = dates(expand(&e, DateRange::from(date(9999, 12, 1))).unwrap());
        assert_eq!(got.len(), 5);
        assert_eq!(got.last(), Some(&date(9999, 12, 29)));

        let e = event(date(9999, 11, 30), RepeatRule::every(RepeatKind::Monthly, 1));
        let got = dates(expand(&e, DateRange::from(date(9999, 1, 1))).unwrap());
        assert_eq!(got, vec![date(9999, 11, 30), date(9999, 12, 30)]);
    }

    #[test]
    fn date_range_contains() {
        let range = DateRange::new(date(2024, 7, 1), date(2024, 7, 31));
        assert!(range.contains(date(2024, 7, 1)));
        assert!(range.contains(date(2024, 7, 31)));
        assert!(!range.contains(date(2024, 8, 1)));
        assert!(DateRange::from(date(2024, 7, 1)).contains(date(2999, 1, 1)));
    }
}
