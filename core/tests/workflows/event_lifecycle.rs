// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end event lifecycle workflow tests.
//!
//! These tests validate complete workflows from event creation through
//! modification and deletion, with conflict checks on every commit.

use std::collections::HashSet;

use jiff::civil::{date, time};

use timetab_core::{
    Error, EventBook, EventPatch, EventRecord, RepeatKind, RepeatRule, format_time,
    overlapping_events,
};

use crate::common::{draft, july_events};

/// The line the conflict dialog shows for an existing event.
fn dialog_line(event: &EventRecord) -> String {
    format!(
        "{} ({} {}-{})",
        event.title,
        event.date,
        format_time(event.start_time),
        format_time(event.end_time)
    )
}

#[test]
fn event_lifecycle_conflict_dialog_flow() {
    // Arrange
    let mut book = EventBook::default();
    let a = book
        .add(draft("팀 회의", date(2024, 7, 20), time(10, 0, 0, 0), time(11, 0, 0, 0)))
        .unwrap()
        .clone();

    // Act
    let candidate = draft("새 회의", date(2024, 7, 20), time(10, 30, 0, 0), time(11, 30, 0, 0));
    let err = book.add(candidate.clone()).unwrap_err();

    // Assert - the dialog lists the overlapping event
    let Error::Conflict { ids } = err else {
        panic!("expected a conflict, got {err:?}");
    };
    let lines: Vec<String> = ids
        .iter()
        .filter_map(|id| book.get(id))
        .map(dialog_line)
        .collect();
    assert_eq!(lines, ["팀 회의 (2024-07-20 10:00-11:00)"]);
    assert_eq!(book.len(), 1);

    // Act - the user chooses to proceed anyway
    let b = book.add_unchecked(candidate).unwrap().clone();

    // Assert
    assert_eq!(book.len(), 2);
    assert_eq!(overlapping_events(&b, book.events(), 365).unwrap(), vec![&a]);
}

#[test]
fn event_lifecycle_update_and_delete_flow() {
    // Arrange
    let mut book = EventBook::new(july_events());

    // Act - move the team meeting onto the lunch appointment
    let patch = EventPatch {
        date: Some(date(2024, 7, 21)),
        start_time: Some(time(13, 0, 0, 0)),
        end_time: Some(time(14, 0, 0, 0)),
        ..Default::default()
    };
    let err = book.update("1", &patch).unwrap_err();

    // Assert
    assert_eq!(
        err,
        Error::Conflict {
            ids: vec!["2".to_string()]
        }
    );

    // Act - delete the lunch and retry
    let removed = book.remove("2").unwrap();
    let moved = book.update("1", &patch).unwrap();

    // Assert
    assert_eq!(removed.title, "점심 약속");
    assert_eq!(moved.date, date(2024, 7, 21));
    assert_eq!(book.len(), 9);
    assert!(book.get("2").is_none());
}

#[test]
fn event_lifecycle_recurring_conflict_flow() {
    // Arrange
    let mut book = EventBook::new(july_events());

    // Act - the weekly workout comes back on 2024-07-29
    let err = book
        .add(draft("야간 회의", date(2024, 7, 29), time(18, 30, 0, 0), time(19, 30, 0, 0)))
        .unwrap_err();

    // Assert
    assert_eq!(
        err,
        Error::Conflict {
            ids: vec!["5".to_string()]
        }
    );

    // Act - a recurring candidate hits several fixture events
    let mut daily = draft("아침 명상", date(2024, 7, 14), time(9, 0, 0, 0), time(10, 0, 0, 0));
    daily.repeat = RepeatRule::every(RepeatKind::Daily, 1);
    let err = book.add(daily).unwrap_err();

    // Assert - ids come in committed order
    let Error::Conflict { ids } = err else {
        panic!("expected a conflict");
    };
    assert_eq!(ids, ["3", "8"]);
}

#[test]
fn event_lifecycle_invalid_drafts_are_rejected() {
    let mut book = EventBook::new(july_events());

    let backwards = draft("거꾸로", date(2024, 7, 30), time(11, 0, 0, 0), time(10, 0, 0, 0));
    assert!(matches!(
        book.add(backwards),
        Err(Error::InvalidTimeRange { .. })
    ));

    let mut zero = draft("간격 없음", date(2024, 7, 30), time(10, 0, 0, 0), time(11, 0, 0, 0));
    zero.repeat = RepeatRule::every(RepeatKind::Weekly, 0);
    assert!(matches!(book.add(zero), Err(Error::InvalidRecurrence(_))));

    assert_eq!(book.len(), 10);
}

#[test]
fn event_lifecycle_notification_flow() {
    // Arrange
    let book = EventBook::new(july_events());
    let mut notified = HashSet::new();

    // Act
    let now = date(2024, 7, 20).at(9, 59, 30, 0);
    let due = book.due_notifications(now, &notified);

    // Assert
    let ids: Vec<&str> = due.iter().map(|r| r.event_id.as_str()).collect();
    assert_eq!(ids, ["1"]);
    assert_eq!(due[0].message(), "1분 후 팀 회의 일정이 시작됩니다.");

    // Act - once notified, the reminder is not repeated
    notified.insert(due[0].event_id.clone());
    assert!(book.due_notifications(now, &notified).is_empty());
}
