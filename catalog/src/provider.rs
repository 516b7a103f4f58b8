// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Catalog sources.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use timetab_core::LectureRecord;

use crate::config::CatalogConfig;
use crate::error::CatalogError;

/// A source of lecture lists, addressed by resource key.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches the lectures published under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is unknown or cannot be fetched.
    async fn fetch(&self, key: &str) -> Result<Vec<LectureRecord>, CatalogError>;
}

/// Catalog provider backed by JSON documents served over HTTP.
#[derive(Debug)]
pub struct HttpCatalog {
    client: Client,
    config: CatalogConfig,
}

impl HttpCatalog {
    /// Creates a new HTTP catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be
    /// built.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogError::Config("base_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Full URL for a resource key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not configured.
    pub fn url_for(&self, key: &str) -> Result<String, CatalogError> {
        let path = self
            .config
            .resources
            .get(key)
            .ok_or_else(|| CatalogError::UnknownResource(key.to_string()))?;

        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.clone());
        }

        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            Ok(format!("{base}{path}"))
        } else {
            Ok(format!("{base}/{path}"))
        }
    }

    async fn execute(&self, url: &str) -> Result<Response, CatalogError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        Err(CatalogError::Http(format!("{status}: {text}")))
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn fetch(&self, key: &str) -> Result<Vec<LectureRecord>, CatalogError> {
        let url = self.url_for(key)?;
        let body = self.execute(&url).await?.text().await?;
        let lectures: Vec<LectureRecord> = serde_json::from_str(&body)?;
        tracing::debug!(count = lectures.len(), "fetched catalog resource");
        Ok(lectures)
    }
}
