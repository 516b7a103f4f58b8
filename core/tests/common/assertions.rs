// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use timetab_core::{Occurrence, Searchable};

/// Asserts that the items carry exactly the expected ids, in order.
///
/// # Panics
///
/// Panics if the ids differ.
pub fn assert_ids<T: Searchable>(items: &[T], expected: &[&str]) {
    let ids: Vec<&str> = items.iter().map(Searchable::id).collect();
    assert_eq!(ids, expected, "id mismatch");
}

/// Asserts that no two occurrences on the same date overlap.
///
/// # Panics
///
/// Panics on the first overlapping pair.
#[allow(dead_code)]
pub fn assert_no_overlap(occurrences: &[Occurrence]) {
    for (i, a) in occurrences.iter().enumerate() {
        for b in occurrences.iter().skip(i + 1) {
            assert!(
                !a.overlaps(b),
                "{} and {} overlap on {}",
                a.source_event_id,
                b.source_event_id,
                a.concrete_date
            );
        }
    }
}
