// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use jiff::civil::{Date, Time};
use timetab_core::{RepeatKind, SearchOptions, TimeSlot, Weekday};

use crate::util::{OutputFormat, parse_date, parse_time};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches
            .try_get_one::<bool>("verbose")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
            .global(true)
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .try_get_one::<OutputFormat>("output-format")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn title() -> Arg {
        arg!(title: <TITLE> "Title of the event")
    }

    pub fn get_title(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("title")
            .expect("title is required")
            .clone()
    }

    pub fn date() -> Arg {
        arg!(-d --date <DATE> "Date of the event (YYYY-MM-DD)")
            .value_parser(parse_date)
            .required(true)
    }

    pub fn get_date(matches: &ArgMatches) -> Date {
        *matches.get_one("date").expect("date is required")
    }

    pub fn start() -> Arg {
        arg!(--start <START> "Start time of the event (HH:MM)")
            .value_parser(parse_time)
            .required(true)
    }

    pub fn get_start(matches: &ArgMatches) -> Time {
        *matches.get_one("start").expect("start is required")
    }

    pub fn end() -> Arg {
        arg!(--end <END> "End time of the event (HH:MM)")
            .value_parser(parse_time)
            .required(true)
    }

    pub fn get_end(matches: &ArgMatches) -> Time {
        *matches.get_one("end").expect("end is required")
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event")
    }

    pub fn location() -> Arg {
        arg!(--location <LOCATION> "Location of the event")
    }

    pub fn category() -> Arg {
        arg!(--category <CATEGORY> "Category of the event")
    }

    pub fn get_text(matches: &ArgMatches, id: &str) -> String {
        matches.get_one::<String>(id).cloned().unwrap_or_default()
    }

    pub fn repeat() -> Arg {
        arg!(--repeat <REPEAT> "How the event repeats")
            .value_parser(value_parser!(RepeatKind))
            .default_value("none")
    }

    pub fn get_repeat(matches: &ArgMatches) -> RepeatKind {
        matches.get_one("repeat").copied().unwrap_or_default()
    }

    pub fn interval() -> Arg {
        arg!(--interval <N> "Repeat every N days, weeks or months")
            .value_parser(value_parser!(i32).range(1..))
            .default_value("1")
    }

    pub fn get_interval(matches: &ArgMatches) -> i32 {
        matches.get_one("interval").copied().unwrap_or(1)
    }

    pub fn notify() -> Arg {
        arg!(--notify <MINUTES> "Minutes before the start to remind")
            .value_parser(value_parser!(i64).range(0..))
            .default_value("10")
    }

    pub fn get_notify(matches: &ArgMatches) -> i64 {
        matches.get_one("notify").copied().unwrap_or(10)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchArgs;

impl SearchArgs {
    pub fn query() -> Arg {
        arg!(query: [QUERY] "Case-insensitive text to look for")
    }

    pub fn grade() -> Arg {
        arg!(-g --grade <GRADE> "Only this school year, may repeat")
            .value_parser(value_parser!(u8))
            .action(ArgAction::Append)
    }

    pub fn day() -> Arg {
        arg!(--day <DAY> "Only lectures meeting on this weekday (월, mon, ...), may repeat")
            .value_parser(|s: &str| s.parse::<Weekday>())
            .action(ArgAction::Append)
    }

    pub fn time() -> Arg {
        arg!(-t --time <PERIOD> "Only lectures meeting in this period (1-24), may repeat")
            .value_parser(parse_slot)
            .action(ArgAction::Append)
    }

    pub fn major() -> Arg {
        arg!(-m --major <MAJOR> "Only lectures of this major, may repeat")
            .action(ArgAction::Append)
    }

    pub fn credits() -> Arg {
        arg!(--credits <CREDITS> "Only lectures worth this many credits")
            .value_parser(value_parser!(u8).range(1..))
    }

    pub fn get_options(matches: &ArgMatches) -> SearchOptions {
        fn many<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Vec<T> {
            matches
                .try_get_many::<T>(id)
                .ok()
                .flatten()
                .map(|values| values.cloned().collect())
                .unwrap_or_default()
        }

        SearchOptions {
            query: matches.get_one::<String>("query").cloned(),
            grades: many(matches, "grade"),
            days: many(matches, "day"),
            times: many(matches, "time"),
            majors: many(matches, "major"),
            credits: matches.try_get_one("credits").ok().flatten().copied(),
        }
    }
}

fn parse_slot(s: &str) -> Result<TimeSlot, String> {
    let n: i64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid period '{s}'"))?;
    TimeSlot::new(n).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use clap::Command;
    use jiff::civil::{date, time};

    use super::*;

    fn search_command() -> Command {
        Command::new("test")
            .arg(SearchArgs::query())
            .arg(SearchArgs::grade())
            .arg(SearchArgs::day())
            .arg(SearchArgs::time())
            .arg(SearchArgs::major())
            .arg(SearchArgs::credits())
    }

    #[test]
    fn test_search_options() {
        let matches = search_command()
            .try_get_matches_from([
                "test", "자료", "-g", "2", "-g", "3", "--day", "월", "--day", "wed", "-t", "3",
                "-m", "컴퓨터공학과", "--credits", "3",
            ])
            .unwrap();

        let options = SearchArgs::get_options(&matches);
        assert_eq!(options.query.as_deref(), Some("자료"));
        assert_eq!(options.grades, vec![2, 3]);
        assert_eq!(options.days, vec![Weekday::Monday, Weekday::Wednesday]);
        assert_eq!(options.times, vec![TimeSlot::new(3).unwrap()]);
        assert_eq!(options.majors, vec!["컴퓨터공학과".to_string()]);
        assert_eq!(options.credits, Some(3));
    }

    #[test]
    fn test_empty_search_options() {
        let matches = search_command().try_get_matches_from(["test"]).unwrap();
        assert!(SearchArgs::get_options(&matches).is_empty());
    }

    #[test]
    fn test_common_args_fall_back_when_undefined() {
        let matches = search_command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(CommonArgs::get_output_format(&matches), OutputFormat::Table);
        assert!(!CommonArgs::get_verbose(&matches));

        let matches = Command::new("test")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
            .try_get_matches_from(["test", "--output-format", "json", "-v"])
            .unwrap();
        assert_eq!(CommonArgs::get_output_format(&matches), OutputFormat::Json);
        assert!(CommonArgs::get_verbose(&matches));
    }

    #[test]
    fn test_invalid_period() {
        let res = search_command().try_get_matches_from(["test", "-t", "25"]);
        assert!(res.is_err());
        let res = search_command().try_get_matches_from(["test", "--day", "someday"]);
        assert!(res.is_err());
        let res = search_command().try_get_matches_from(["test", "--credits", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_event_args() {
        let cmd = Command::new("test")
            .arg(EventArgs::title())
            .arg(EventArgs::date())
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::repeat())
            .arg(EventArgs::interval())
            .arg(EventArgs::notify());

        let matches = cmd
            .clone()
            .try_get_matches_from([
                "test", "운동", "-d", "2024-07-22", "--start", "18:00", "--end", "19:00",
                "--repeat", "weekly", "--interval", "2",
            ])
            .unwrap();
        assert_eq!(EventArgs::get_title(&matches), "운동");
        assert_eq!(EventArgs::get_date(&matches), date(2024, 7, 22));
        assert_eq!(EventArgs::get_start(&matches), time(18, 0, 0, 0));
        assert_eq!(EventArgs::get_end(&matches), time(19, 0, 0, 0));
        assert_eq!(EventArgs::get_repeat(&matches), RepeatKind::Weekly);
        assert_eq!(EventArgs::get_interval(&matches), 2);
        assert_eq!(EventArgs::get_notify(&matches), 10);

        let res = cmd.try_get_matches_from([
            "test", "x", "-d", "2024-07-22", "--start", "18:00", "--end", "19:00", "--interval",
            "0",
        ]);
        assert!(res.is_err());
    }
}
