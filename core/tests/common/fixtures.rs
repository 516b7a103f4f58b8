// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! The event fixture is written as JSON so that the wire format is exercised
//! together with the engine.

use jiff::civil::{Date, Time};

use timetab_core::{EventDraft, EventRecord, LectureRecord};

/// Ten non-overlapping events in July 2024.
///
/// Exactly one event mentions "생일", two mention "팀", and event 5 repeats
/// weekly from 2024-07-22.
const EVENTS_JSON: &str = r#"[
  {
    "id": "1",
    "title": "팀 회의",
    "date": "2024-07-20",
    "startTime": "10:00",
    "endTime": "11:00",
    "description": "주간 팀 미팅",
    "location": "회의실 A",
    "category": "업무",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 1
  },
  {
    "id": "2",
    "title": "점심 약속",
    "date": "2024-07-21",
    "startTime": "12:30",
    "endTime": "13:30",
    "description": "동료와 점심",
    "location": "회사 근처 식당",
    "category": "개인",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 10
  },
  {
    "id": "3",
    "title": "프로젝트 마감",
    "date": "2024-07-25",
    "startTime": "09:00",
    "endTime": "18:00",
    "description": "분기별 프로젝트 마감",
    "location": "사무실",
    "category": "업무",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 60
  },
  {
    "id": "4",
    "title": "생일 파티",
    "date": "2024-07-28",
    "startTime": "19:00",
    "endTime": "22:00",
    "description": "친구 축하 모임",
    "location": "친구 집",
    "category": "개인",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 60
  },
  {
    "id": "5",
    "title": "운동",
    "date": "2024-07-22",
    "startTime": "18:00",
    "endTime": "19:00",
    "description": "주간 운동",
    "location": "헬스장",
    "category": "개인",
    "repeat": { "isRepeating": true, "type": "weekly", "interval": 1 },
    "notificationTime": 10
  },
  {
    "id": "6",
    "title": "독서 모임",
    "date": "2024-07-02",
    "startTime": "19:00",
    "endTime": "21:00",
    "description": "이달의 책 토론",
    "location": "동네 도서관",
    "category": "개인",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 10
  },
  {
    "id": "7",
    "title": "팀 회식",
    "date": "2024-07-12",
    "startTime": "18:30",
    "endTime": "21:00",
    "description": "분기 회식",
    "location": "고깃집",
    "category": "업무",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 10
  },
  {
    "id": "8",
    "title": "병원 예약",
    "date": "2024-07-16",
    "startTime": "09:30",
    "endTime": "10:30",
    "description": "정기 검진",
    "location": "시내 병원",
    "category": "개인",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 120
  },
  {
    "id": "9",
    "title": "스터디",
    "date": "2024-07-19",
    "startTime": "20:00",
    "endTime": "22:00",
    "description": "알고리즘 문제 풀이",
    "location": "온라인",
    "category": "학습",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 10
  },
  {
    "id": "10",
    "title": "가족 모임",
    "date": "2024-07-14",
    "startTime": "12:00",
    "endTime": "14:00",
    "description": "할머니 댁 방문",
    "location": "할머니 댁",
    "category": "가족",
    "repeat": { "isRepeating": false, "type": "none", "interval": 1 },
    "notificationTime": 1440
  }
]"#;

/// Lecture catalog in the shape the catalog endpoints serve.
const LECTURES_JSON: &str = r#"[
  { "id": "502007", "title": "자료구조", "credits": "3", "grade": 2, "major": "컴퓨터공학과", "schedule": "월1~3(공학관 101)<p>수1~3(공학관 101)" },
  { "id": "502009", "title": "운영체제", "credits": "3(2)", "grade": 3, "major": "컴퓨터공학과", "schedule": "화4~6<p>목4~6" },
  { "id": "502011", "title": "알고리즘", "credits": "3", "grade": 2, "major": "컴퓨터공학과", "schedule": "월3~5" },
  { "id": "310101", "title": "회로이론", "credits": "3", "grade": 1, "major": "전자공학과", "schedule": "금19~21" },
  { "id": "100200", "title": "대학글쓰기", "credits": 2, "grade": 1, "major": "교양", "schedule": "" },
  { "id": "100300", "title": "영어회화", "credits": "1학점", "grade": 1, "major": "교양", "schedule": "수7~8<p>금7~8" }
]"#;

/// The ten July 2024 events.
#[must_use]
pub fn july_events() -> Vec<EventRecord> {
    serde_json::from_str(EVENTS_JSON).expect("event fixture should parse")
}

/// The lecture catalog.
#[must_use]
pub fn lectures() -> Vec<LectureRecord> {
    serde_json::from_str(LECTURES_JSON).expect("lecture fixture should parse")
}

/// A draft on the given date and clock times, with no repeat.
#[must_use]
pub fn draft(title: &str, on: Date, start: Time, end: Time) -> EventDraft {
    EventDraft::new(title, on, start, end)
}
