// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised by the scheduling engine.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The repeat rule of an event cannot be expanded.
    #[error("invalid recurrence: {0}")]
    InvalidRecurrence(String),

    /// The end of an event is not after its start.
    #[error("invalid time range: {start}~{end}")]
    InvalidTimeRange {
        /// Start time as written in the record.
        start: String,
        /// End time as written in the record.
        end: String,
    },

    /// The candidate collides with committed entries.
    #[error("schedule conflict with {} existing item(s): {}", ids.len(), ids.join(", "))]
    Conflict {
        /// Identifiers of the conflicting entries, in committed order.
        ids: Vec<String>,
    },

    /// No item with the given identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// A time slot index outside the period table.
    #[error("invalid time slot: {0}")]
    InvalidSlot(i64),
}
