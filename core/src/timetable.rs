// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Course timetables made of schedule entries.

use serde::{Deserialize, Serialize};

use crate::conflict::detect;
use crate::error::Error;
use crate::event::EventRecord;
use crate::lecture::LectureRecord;
use crate::slot::{DaySchedule, TimeSlot, Weekday};

/// Anything a schedule entry can point at.
pub trait Subject {
    /// Identifier reported when the subject is part of a conflict.
    fn subject_id(&self) -> &str;
}

impl Subject for LectureRecord {
    fn subject_id(&self) -> &str {
        &self.id
    }
}

impl Subject for EventRecord {
    fn subject_id(&self) -> &str {
        &self.id
    }
}

impl Subject for String {
    fn subject_id(&self) -> &str {
        self
    }
}

/// One block in a timetable: a day schedule and the subject occupying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry<S> {
    /// Day and periods taken.
    #[serde(flatten)]
    pub schedule: DaySchedule,

    /// What occupies the block.
    #[serde(alias = "lecture")]
    pub subject: S,
}

/// A single timetable; no two entries share a `(day, slot)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable<S> {
    entries: Vec<ScheduleEntry<S>>,
}

impl<S> Default for Timetable<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<S> Timetable<S> {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ScheduleEntry<S>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timetable has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that would collide with the candidate schedules.
    pub fn conflicts(&self, candidate: &[DaySchedule]) -> Vec<&ScheduleEntry<S>> {
        detect(candidate, &self.entries)
    }

    /// The entry occupying the given cell.
    pub fn entry_at(&self, day: Weekday, slot: TimeSlot) -> Option<&ScheduleEntry<S>> {
        self.entries
            .iter()
            .find(|e| e.schedule.day == day && e.schedule.contains(slot))
    }

    /// Removes the entry occupying the given cell.
    pub fn remove_at(&mut self, day: Weekday, slot: TimeSlot) -> Option<ScheduleEntry<S>> {
        let index = self
            .entries
            .iter()
            .position(|e| e.schedule.day == day && e.schedule.contains(slot))?;
        Some(self.entries.remove(index))
    }
}

impl<S: Subject + Clone> Timetable<S> {
    /// Adds one entry per schedule, all pointing at `subject`.
    ///
    /// Schedules of the subject that fall on the same day are merged first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] with the ids of the colliding subjects when
    /// any schedule overlaps an existing entry; nothing is added in that case.
    pub fn add(&mut self, schedules: Vec<DaySchedule>, subject: S) -> Result<(), Error> {
        let schedules = merge_same_day(schedules);
        let conflicts = self.conflicts(&schedules);
        if !conflicts.is_empty() {
            let mut ids: Vec<String> = Vec::with_capacity(conflicts.len());
            for entry in conflicts {
                let id = entry.subject.subject_id();
                if !ids.iter().any(|a| a == id) {
                    ids.push(id.to_string());
                }
            }
            return Err(Error::Conflict { ids });
        }

        tracing::debug!(subject = subject.subject_id(), n = schedules.len(), "add entries");
        self.entries
            .extend(schedules.into_iter().map(|schedule| ScheduleEntry {
                schedule,
                subject: subject.clone(),
            }));
        Ok(())
    }

    /// Removes every entry of the given subject, returning how many were removed.
    pub fn remove_subject(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.subject.subject_id() != id);
        before - self.entries.len()
    }
}

impl Timetable<LectureRecord> {
    /// Parses the lecture's schedule string and adds it.
    ///
    /// A lecture whose schedule cannot be parsed adds no entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when the lecture collides with an existing entry.
    pub fn add_lecture(&mut self, lecture: LectureRecord) -> Result<(), Error> {
        let schedules = lecture.schedules();
        self.add(schedules, lecture)
    }
}

/// Unions the ranges of schedules that share a day, keeping the first room.
fn merge_same_day(schedules: Vec<DaySchedule>) -> Vec<DaySchedule> {
    let mut merged: Vec<DaySchedule> = Vec::with_capacity(schedules.len());
    for schedule in schedules {
        match merged.iter_mut().find(|m| m.day == schedule.day) {
            Some(existing) => {
                let slots = existing.range().iter().chain(schedule.range()).copied();
                if let Some(mut union) = DaySchedule::new(existing.day, slots.collect::<Vec<_>>()) {
                    union.room = existing.room.take().or(schedule.room);
                    *existing = union;
                }
            }
            None => merged.push(schedule),
        }
    }
    merged
}

/// A set of named timetables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetables<S> {
    tables: Vec<(String, Timetable<S>)>,
}

impl<S> Default for Timetables<S> {
    fn default() -> Self {
        Self { tables: Vec::new() }
    }
}

impl<S> Timetables<S> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty timetable and returns its id.
    pub fn add_table(&mut self) -> String {
        let id = new_table_id();
        self.tables.push((id.clone(), Timetable::new()));
        id
    }

    /// The timetable with the given id.
    pub fn get(&self, id: &str) -> Option<&Timetable<S>> {
        self.tables.iter().find(|(k, _)| k == id).map(|(_, t)| t)
    }

    /// The timetable with the given id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Timetable<S>> {
        self.tables.iter_mut().find(|(k, _)| k == id).map(|(_, t)| t)
    }

    /// Removes a timetable together with its entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no timetable has the id.
    pub fn remove_table(&mut self, id: &str) -> Result<Timetable<S>, Error> {
        let index = self
            .tables
            .iter()
            .position(|(k, _)| k == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(self.tables.remove(index).1)
    }

    /// Table ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(k, _)| k.as_str())
    }

    /// Tables with their ids, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Timetable<S>)> {
        self.tables.iter().map(|(k, t)| (k.as_str(), t))
    }

    /// Number of timetables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether there are no timetables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<S: Clone> Timetables<S> {
    /// Copies a timetable under a new id, returning that id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no timetable has the id.
    pub fn duplicate_table(&mut self, id: &str) -> Result<String, Error> {
        let copy = self
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let new_id = new_table_id();
        self.tables.push((new_id.clone(), copy));
        Ok(new_id)
    }
}

fn new_table_id() -> String {
    format!("schedule-{}", uuid::Uuid::new_v4())
}
