// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration-driven workflow tests.
//!
//! These tests verify that the values read from a configuration file reach
//! the calendar, search and conflict components.

use jiff::civil::{date, time};

use timetab_core::{
    Config, EventBook, RepeatKind, RepeatRule, SearchSession, Weekday, bucket_len, month_view,
    week_view,
};

use crate::common::{draft, july_events, lectures};

const CONFIG_TOML: &str = r#"
first_weekday = "mon"
page_size = 4
recurrence_cap = 2
conflict_horizon_days = 7
"#;

fn config() -> Config {
    let mut config: Config = toml::from_str(CONFIG_TOML).unwrap();
    config.normalize().unwrap();
    config
}

#[test]
fn config_driven_first_weekday_and_cap() {
    let config = config();
    assert_eq!(config.first_weekday, Weekday::Monday);
    assert_eq!(config.recurrence_cap, 2);

    let events = july_events();
    let week = week_view(&events, date(2024, 7, 31), &config);
    assert_eq!(bucket_len(&week), 1);
    assert_eq!(week[&Weekday::Monday][0].concrete_date, date(2024, 7, 29));

    // four Mondays in August, two emitted
    let august = month_view(&events, date(2024, 8, 1), &config);
    assert_eq!(bucket_len(&august), 2);
    assert!(august.contains_key(&5) && august.contains_key(&12));
}

#[test]
fn config_driven_page_size() {
    let config = config();
    let mut session = SearchSession::new(lectures(), config.page_size);
    assert_eq!(session.visible().len(), 4);
    assert_eq!(session.next_page(), 2);
    assert_eq!(session.visible().len(), 6);
}

#[test]
fn config_driven_conflict_horizon() {
    let config = config();
    let mut book = EventBook::with_config(july_events(), &config);

    // the third Sunday of this weekly candidate is the birthday party
    let mut weekly = draft("저녁 약속", date(2024, 7, 14), time(19, 30, 0, 0), time(20, 0, 0, 0));
    weekly.repeat = RepeatRule::every(RepeatKind::Weekly, 1);
    assert!(book.add(weekly.clone()).is_ok());

    let mut strict = EventBook::new(july_events());
    assert!(strict.add(weekly).is_err());
}
