// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text search over the July fixture.

use timetab_core::{EventBook, SearchOptions, SearchSession, Weekday, filter};

use crate::common::{assert_ids, july_events, lectures};

fn query(text: &str) -> SearchOptions {
    SearchOptions {
        query: Some(text.to_string()),
        ..Default::default()
    }
}

#[test]
fn search_fixture_query_counts() {
    let book = EventBook::new(july_events());

    let team = book.search(&query("팀"));
    assert!((1..=10).contains(&team.len()));
    assert_ids(&team, &["1", "7"]);

    let birthday = book.search(&query("생일"));
    assert_eq!(birthday.len(), 1);
    assert_eq!(birthday[0].title, "생일 파티");

    assert_eq!(book.search(&query("")).len(), 10);
    assert_eq!(book.search(&SearchOptions::default()).len(), 10);
}

#[test]
fn search_fixture_matches_description_and_location() {
    let book = EventBook::new(july_events());
    assert_ids(&book.search(&query("헬스장")), &["5"]);
    assert_ids(&book.search(&query("정기 검진")), &["8"]);
}

#[test]
fn search_fixture_filters_events_by_weekday() {
    let events = july_events();
    let options = SearchOptions {
        days: vec![Weekday::Saturday],
        ..Default::default()
    };
    // 2024-07-20 is the only Saturday in the fixture
    assert_ids(&filter(&events, &options), &["1"]);
}

#[test]
fn search_fixture_lecture_session() {
    let mut session = SearchSession::new(lectures(), 2);
    assert_eq!(session.len(), 6);
    assert_eq!(session.last_page(), 3);
    assert_eq!(session.visible().len(), 2);
    assert_eq!(session.next_page(), 2);
    assert_eq!(session.visible().len(), 4);

    assert!(session.update(|o| {
        o.majors = vec!["컴퓨터공학과".to_string()];
        o.grades = vec![2];
    }));
    assert_eq!(session.page(), 1);
    assert_ids(&session.visible(), &["502007", "502011"]);

    assert!(session.set_options(SearchOptions::for_cell(
        Weekday::Friday,
        timetab_core::TimeSlot::new(20).unwrap(),
    )));
    assert_ids(&session.visible(), &["310101"]);
    assert_eq!(session.majors(), ["컴퓨터공학과", "전자공학과", "교양"]);
}
