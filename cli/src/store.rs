// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! JSON file holding the committed events, shaped `{ "events": [...] }`.

use std::{error::Error, io, path::Path};

use serde::{Deserialize, Serialize};
use timetab_core::EventRecord;
use tokio::fs;

#[derive(Debug, Default, Serialize, Deserialize)]
struct EventFile {
    #[serde(default)]
    events: Vec<EventRecord>,
}

/// Reads the events at `path`; a missing file is an empty store.
pub async fn load_events(path: &Path) -> Result<Vec<EventRecord>, Box<dyn Error>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "event store not found, start empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(format!("Failed to read event store at {}: {e}", path.display()).into());
        }
    };

    let file: EventFile = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid event store at {}: {e}", path.display()))?;
    tracing::debug!(count = file.events.len(), "events loaded");
    Ok(file.events)
}

/// Writes the events to `path`, creating parent directories as needed.
pub async fn save_events(path: &Path, events: &[EventRecord]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    #[derive(Serialize)]
    struct EventFileRef<'a> {
        events: &'a [EventRecord],
    }

    let content = serde_json::to_string_pretty(&EventFileRef { events })?;
    fs::write(path, content).await?;
    tracing::debug!(count = events.len(), path = %path.display(), "events saved");
    Ok(())
}
