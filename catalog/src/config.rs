// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

/// Catalog server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog server.
    pub base_url: String,
    /// Resource paths by key, e.g. `majors = "/api/majors.json"`.
    #[serde(default)]
    pub resources: HashMap<String, String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("timetab-catalog/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            resources: HashMap::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogConfig {
    /// Adds a resource, returning the updated configuration.
    #[must_use]
    pub fn with_resource(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.resources.insert(key.into(), path.into());
        self
    }

    /// Sorted resource keys.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
