// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lecture catalog access with request coalescing.
//!
//! Concurrent requests for the same catalog resource share a single fetch.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions)]

mod catalog;
mod coalesce;
mod config;
mod error;
mod provider;

pub use crate::catalog::Catalog;
pub use crate::coalesce::{CoalescingCache, SharedFetch};
pub use crate::config::CatalogConfig;
pub use crate::error::CatalogError;
pub use crate::provider::{CatalogProvider, HttpCatalog};
