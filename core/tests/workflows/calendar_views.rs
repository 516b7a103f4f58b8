// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Week and month views over the July fixture.

use jiff::civil::date;

use timetab_core::{Config, Occurrence, Weekday, bucket_len, month_view, week_view};

use crate::common::{assert_no_overlap, july_events};

#[test]
fn calendar_month_view_is_superset_of_week_view() {
    // Arrange
    let events = july_events();
    let config = Config::default();
    let reference = date(2024, 7, 20);

    // Act
    let week = week_view(&events, reference, &config);
    let month = month_view(&events, reference, &config);

    // Assert
    assert_eq!(bucket_len(&week), 4);
    assert_eq!(bucket_len(&month), 11);
    assert!(bucket_len(&month) > bucket_len(&week));
    for occurrence in week.values().flatten() {
        let day = &month[&occurrence.concrete_date.day()];
        assert!(day.contains(occurrence), "{occurrence:?} missing from month");
    }

    let all: Vec<Occurrence> = month.into_values().flatten().collect();
    assert_no_overlap(&all);
}

#[test]
fn calendar_week_view_follows_first_weekday() {
    let events = july_events();
    let reference = date(2024, 7, 20);

    let sunday_first = week_view(&events, reference, &Config::default());
    assert!(sunday_first.contains_key(&Weekday::Sunday));
    assert_eq!(sunday_first[&Weekday::Sunday][0].source_event_id, "10");
    let ids: Vec<&str> = sunday_first
        .values()
        .flatten()
        .map(|o| o.source_event_id.as_str())
        .collect();
    assert_eq!(ids, ["10", "8", "9", "1"]);

    let monday_first = Config {
        first_weekday: Weekday::Monday,
        ..Default::default()
    };
    let week = week_view(&events, reference, &monday_first);
    assert_eq!(bucket_len(&week), 4);
    assert_eq!(week[&Weekday::Sunday][0].source_event_id, "2");
    let days: Vec<Weekday> = week.keys().collect();
    assert_eq!(
        days,
        [Weekday::Tuesday, Weekday::Friday, Weekday::Saturday, Weekday::Sunday]
    );
}

#[test]
fn calendar_recurring_event_fills_later_weeks() {
    let events = july_events();
    let config = Config::default();

    let week = week_view(&events, date(2024, 8, 14), &config);
    let ids: Vec<&str> = week
        .values()
        .flatten()
        .map(|o| o.source_event_id.as_str())
        .collect();
    assert_eq!(ids, ["5"]);
    assert_eq!(week[&Weekday::Monday][0].concrete_date, date(2024, 8, 12));
}
