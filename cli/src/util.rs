// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{Date, DateTime, Time};
use jiff::fmt::strtime;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub fn parse_date(s: &str) -> Result<Date, String> {
    strtime::parse("%Y-%m-%d", s.trim())
        .and_then(|a| a.to_date())
        .map_err(|_| format!("Invalid date '{s}'. Expected format: YYYY-MM-DD"))
}

pub fn parse_time(s: &str) -> Result<Time, String> {
    strtime::parse("%H:%M", s.trim())
        .and_then(|a| a.to_time())
        .map_err(|_| format!("Invalid time '{s}'. Expected format: HH:MM"))
}

/// Parses `YYYY-MM-DD HH:MM`, or `HH:MM` on the given day.
pub fn parse_datetime(today: Date, s: &str) -> Result<DateTime, String> {
    let s = s.trim();
    if let Ok(dt) = strtime::parse("%Y-%m-%d %H:%M", s).and_then(|a| a.to_datetime()) {
        Ok(dt)
    } else if let Ok(time) = parse_time(s) {
        // If the input is just a time, we assume it's today
        Ok(today.to_datetime(time))
    } else {
        Err(format!(
            "Invalid datetime '{s}'. Expected format: YYYY-MM-DD HH:MM or HH:MM"
        ))
    }
}

/// Display width of a string, counting wide characters twice.
pub fn display_width(s: &str) -> usize {
    s.width()
}
