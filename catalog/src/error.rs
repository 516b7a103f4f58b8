// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Catalog access errors.
///
/// The error is `Clone` because one failed fetch is reported to every caller
/// attached to it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The payload is not a lecture list.
    #[error("Invalid catalog payload: {0}")]
    Decode(String),

    /// The key is not in the configured resources.
    #[error("Unknown catalog resource: {0}")]
    UnknownResource(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
