// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use jiff::civil::DateTime;

use crate::config::{Config, DEFAULT_CONFLICT_HORIZON_DAYS};
use crate::conflict::overlapping_events;
use crate::error::Error;
use crate::event::{EventDraft, EventPatch, EventRecord};
use crate::notification::{Reminder, due_notifications};
use crate::search::{SearchOptions, filter};

/// The committed set of events.
///
/// Every mutation that goes through the checked methods keeps the set free of
/// overlapping occurrences within the conflict horizon.
#[derive(Debug, Clone)]
pub struct EventBook {
    events: Vec<EventRecord>,
    horizon_days: i64,
}

impl Default for EventBook {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl EventBook {
    /// Wraps existing events with the default conflict horizon.
    pub fn new(events: Vec<EventRecord>) -> Self {
        Self {
            events,
            horizon_days: DEFAULT_CONFLICT_HORIZON_DAYS,
        }
    }

    /// Wraps existing events using the configured conflict horizon.
    pub fn with_config(events: Vec<EventRecord>, config: &Config) -> Self {
        Self {
            events,
            horizon_days: config.conflict_horizon_days,
        }
    }

    /// Committed events in insertion order.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Consumes the book, returning its events.
    pub fn into_events(self) -> Vec<EventRecord> {
        self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the book is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event with the given id.
    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Committed events that overlap the candidate.
    ///
    /// # Errors
    ///
    /// Returns an error when the candidate is invalid.
    pub fn conflicts(&self, candidate: &EventRecord) -> Result<Vec<&EventRecord>, Error> {
        overlapping_events(candidate, &self.events, self.horizon_days)
    }

    /// Commits a new event after checking it against the committed set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] listing the overlapping events, or a
    /// validation error when the draft is invalid.
    #[tracing::instrument(level = "debug", skip_all, fields(title = %draft.title))]
    pub fn add(&mut self, draft: EventDraft) -> Result<&EventRecord, Error> {
        let record = draft.into_record(self.next_id());
        self.ensure_free(&record)?;
        Ok(self.push(record))
    }

    /// Commits a new event without the conflict check, e.g. after the user
    /// confirmed to proceed anyway.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the draft is invalid.
    pub fn add_unchecked(&mut self, draft: EventDraft) -> Result<&EventRecord, Error> {
        let record = draft.into_record(self.next_id());
        record.validate()?;
        Ok(self.push(record))
    }

    /// Applies a patch to an event, checking the result for conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, [`Error::Conflict`] when
    /// the patched event overlaps another one, or a validation error.
    pub fn update(&mut self, id: &str, patch: &EventPatch) -> Result<&EventRecord, Error> {
        let index = self.index_of(id)?;
        let patched = patch.apply_to(&self.events[index]);
        self.ensure_free(&patched)?;
        self.events[index] = patched;
        Ok(&self.events[index])
    }

    /// Removes an event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn remove(&mut self, id: &str) -> Result<EventRecord, Error> {
        let index = self.index_of(id)?;
        tracing::debug!(id, "remove event");
        Ok(self.events.remove(index))
    }

    /// Events matching the search options, in insertion order.
    pub fn search(&self, options: &SearchOptions) -> Vec<&EventRecord> {
        filter(&self.events, options)
    }

    /// Reminders due at `now` for events not in `notified`.
    pub fn due_notifications(&self, now: DateTime, notified: &HashSet<String>) -> Vec<Reminder> {
        due_notifications(&self.events, now, notified)
    }

    fn ensure_free(&self, record: &EventRecord) -> Result<(), Error> {
        let conflicts = self.conflicts(record)?;
        if conflicts.is_empty() {
            return Ok(());
        }

        let ids = conflicts.into_iter().map(|e| e.id.clone()).collect();
        Err(Error::Conflict { ids })
    }

    fn push(&mut self, record: EventRecord) -> &EventRecord {
        tracing::debug!(id = %record.id, "commit event");
        self.events.push(record);
        let last = self.events.len() - 1;
        &self.events[last]
    }

    fn index_of(&self, id: &str) -> Result<usize, Error> {
        self.events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// One past the largest numeric id, so ids stay unique after removals.
    fn next_id(&self) -> String {
        let max = self
            .events
            .iter()
            .filter_map(|e| e.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }
}
