// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Building timetables from search results.

use timetab_core::{
    Error, LectureRecord, ScheduleEntry, SearchOptions, TimeSlot, Timetable, Timetables, Weekday,
    filter,
};

use crate::common::lectures;

fn lecture(id: &str) -> LectureRecord {
    lectures()
        .into_iter()
        .find(|l| l.id == id)
        .expect("lecture should be in the fixture")
}

fn slot(n: i64) -> TimeSlot {
    TimeSlot::new(n).unwrap()
}

#[test]
fn timetable_building_from_cell_search() {
    // Arrange
    let catalog = lectures();
    let mut tables: Timetables<LectureRecord> = Timetables::new();
    let id = tables.add_table();

    // Act - click Monday period 2 and pick the first result
    let found = filter(&catalog, &SearchOptions::for_cell(Weekday::Monday, slot(2)));
    let picked = (*found[0]).clone();
    let table = tables.get_mut(&id).unwrap();
    table.add_lecture(picked).unwrap();

    // Assert
    assert_eq!(table.len(), 2);
    let entry = table.entry_at(Weekday::Wednesday, slot(3)).unwrap();
    assert_eq!(entry.subject.title, "자료구조");
    assert_eq!(entry.schedule.room.as_deref(), Some("공학관 101"));
}

#[test]
fn timetable_building_conflict_then_cell_delete() {
    // Arrange
    let mut table = Timetable::new();
    table.add_lecture(lecture("502007")).unwrap();
    table.add_lecture(lecture("502009")).unwrap();

    // Act
    let err = table.add_lecture(lecture("502011")).unwrap_err();

    // Assert
    assert_eq!(
        err,
        Error::Conflict {
            ids: vec!["502007".to_string()]
        }
    );
    assert_eq!(table.len(), 4);

    // Act - delete the Monday block, the Wednesday block stays
    let removed = table.remove_at(Weekday::Monday, slot(2)).unwrap();
    table.add_lecture(lecture("502011")).unwrap();

    // Assert
    assert_eq!(removed.subject.id, "502007");
    assert!(table.entry_at(Weekday::Wednesday, slot(1)).is_some());
    assert_eq!(
        table.entry_at(Weekday::Monday, slot(3)).unwrap().subject.id,
        "502011"
    );
}

#[test]
fn timetable_building_lecture_without_schedule_adds_nothing() {
    let mut table = Timetable::new();
    table.add_lecture(lecture("100200")).unwrap();
    assert!(table.is_empty());
}

#[test]
fn timetable_building_duplicate_and_remove_tables() {
    let mut tables: Timetables<LectureRecord> = Timetables::new();
    let first = tables.add_table();
    tables
        .get_mut(&first)
        .unwrap()
        .add_lecture(lecture("100300"))
        .unwrap();

    let copy = tables.duplicate_table(&first).unwrap();
    assert_eq!(tables.get(&copy).unwrap().len(), 2);

    // editing the copy leaves the original alone
    assert_eq!(tables.get_mut(&copy).unwrap().remove_subject("100300"), 2);
    assert_eq!(tables.get(&first).unwrap().len(), 2);

    tables.remove_table(&first).unwrap();
    assert_eq!(tables.ids().collect::<Vec<_>>(), [copy.as_str()]);
}

#[test]
fn timetable_building_reads_entries_with_lecture_key() {
    let json = r#"{
        "day": "화",
        "range": [4, 5, 6],
        "lecture": {
            "id": "502009",
            "title": "운영체제",
            "credits": "3(2)",
            "grade": 3,
            "major": "컴퓨터공학과",
            "schedule": "화4~6<p>목4~6"
        }
    }"#;
    let entry: ScheduleEntry<LectureRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(entry.schedule.day, Weekday::Tuesday);
    assert_eq!(entry.schedule.range(), &[slot(4), slot(5), slot(6)]);
    assert_eq!(entry.subject.title, "운영체제");
}
