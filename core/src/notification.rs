// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use jiff::SignedDuration;
use jiff::civil::DateTime;
use serde::Serialize;

use crate::event::EventRecord;
use crate::recurrence::{DateRange, expand};

/// A reminder that is due for an event occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Event the reminder belongs to.
    pub event_id: String,

    /// Title of the event.
    pub title: String,

    /// When the occurrence starts.
    pub starts_at: DateTime,

    /// Reminder lead time of the event, in minutes.
    pub notification_time: i64,
}

impl Reminder {
    /// Text shown to the user.
    pub fn message(&self) -> String {
        format!(
            "{}분 후 {} 일정이 시작됩니다.",
            self.notification_time, self.title
        )
    }
}

/// Reminders due at `now`, one per event at most.
///
/// An occurrence is due when it starts after `now` and no later than the
/// event's `notificationTime` minutes from `now`. Events whose id is in
/// `notified` are skipped.
pub fn due_notifications<'a>(
    events: impl IntoIterator<Item = &'a EventRecord>,
    now: DateTime,
    notified: &HashSet<String>,
) -> Vec<Reminder> {
    let mut reminders = Vec::new();
    for event in events {
        if event.notification_time <= 0 || notified.contains(&event.id) {
            continue;
        }

        let lead = SignedDuration::from_secs(event.notification_time.saturating_mul(60));
        let deadline = now.checked_add(lead).unwrap_or(DateTime::MAX);
        let within = DateRange::new(now.date(), deadline.date());
        let occurrences = match expand(event, within) {
            Ok(occurrences) => occurrences,
            Err(err) => {
                tracing::debug!(id = %event.id, %err, "skip event without valid recurrence");
                continue;
            }
        };

        let due = occurrences.map(|o| o.start()).find(|start| {
            let until = start.duration_since(now);
            until > SignedDuration::ZERO && until <= lead
        });
        if let Some(starts_at) = due {
            reminders.push(Reminder {
                event_id: event.id.clone(),
                title: event.title.clone(),
                starts_at,
                notification_time: event.notification_time,
            });
        }
    }
    reminders
}
