// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::recurrence::DEFAULT_RECURRENCE_CAP;
use crate::search::DEFAULT_PAGE_SIZE;
use crate::slot::Weekday;

/// The name of the timetab application.
pub const APP_NAME: &str = "timetab";

/// File name of the event store inside the data directory.
pub const EVENTS_FILE: &str = "events.json";

/// Default number of days ahead of a candidate that conflict checks look at.
pub const DEFAULT_CONFLICT_HORIZON_DAYS: i64 = 365;

/// Configuration for the scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First day of a week view.
    pub first_weekday: Weekday,

    /// Number of search results per page.
    pub page_size: usize,

    /// Upper bound on the occurrences a single expansion emits.
    pub recurrence_cap: usize,

    /// Days ahead of a candidate event that conflict checks look at.
    pub conflict_horizon_days: i64,

    /// Path to the event store.
    pub data_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sunday,
            page_size: DEFAULT_PAGE_SIZE,
            recurrence_cap: DEFAULT_RECURRENCE_CAP,
            conflict_horizon_days: DEFAULT_CONFLICT_HORIZON_DAYS,
            data_path: None,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the data path cannot be expanded.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if self.page_size == 0 {
            tracing::warn!("page_size must be positive, fall back to {DEFAULT_PAGE_SIZE}");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.recurrence_cap == 0 {
            tracing::warn!("recurrence_cap must be positive, fall back to {DEFAULT_RECURRENCE_CAP}");
            self.recurrence_cap = DEFAULT_RECURRENCE_CAP;
        }
        if self.conflict_horizon_days < 0 {
            tracing::warn!("conflict_horizon_days must not be negative, use 0");
            self.conflict_horizon_days = 0;
        }

        match &self.data_path {
            Some(a) => {
                self.data_path = Some(
                    expand_path(a).map_err(|e| format!("Failed to expand data path: {e}"))?,
                );
            }
            None => match get_data_dir() {
                Ok(a) => self.data_path = Some(a.join(APP_NAME).join(EVENTS_FILE)),
                Err(e) => tracing::warn!("Failed to get data directory: {e}"),
            },
        }

        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8 or the referenced
/// directory cannot be determined.
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

/// User-specific configuration directory.
///
/// # Errors
///
/// Returns an error if the platform has no such directory.
pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

fn get_data_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let data_dir = xdg::BaseDirectories::new().get_data_home();
    #[cfg(windows)]
    let data_dir = dirs::data_dir();
    data_dir.ok_or("User-specific data directory not found".into())
}
