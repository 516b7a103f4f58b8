// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the timetab-core crate.
//!
//! These tests drive several components together: committing events with
//! conflict checks, rendering calendar views, searching and building
//! timetables from a lecture catalog.

mod calendar_views;
mod config_driven;
mod event_lifecycle;
mod search_fixture;
mod timetable_building;
