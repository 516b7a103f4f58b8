// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use futures::future::try_join_all;
use timetab_core::LectureRecord;

use crate::coalesce::CoalescingCache;
use crate::error::CatalogError;
use crate::provider::CatalogProvider;

type Lectures = Arc<Vec<LectureRecord>>;

/// A catalog provider fronted by a coalescing cache.
///
/// Every resource is fetched at most once at a time; resolved resources are
/// served from memory until [`Catalog::invalidate`] or [`Catalog::clear`].
#[derive(Debug)]
pub struct Catalog<P> {
    provider: Arc<P>,
    cache: CoalescingCache<String, Lectures, CatalogError>,
}

impl<P: CatalogProvider + 'static> Catalog<P> {
    /// Wraps a provider with an empty cache.
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, CoalescingCache::new())
    }

    /// Wraps a provider with an existing cache, e.g. one shared with another
    /// catalog.
    pub fn with_cache(
        provider: P,
        cache: CoalescingCache<String, Lectures, CatalogError>,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            cache,
        }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The cache in front of the provider.
    pub fn cache(&self) -> &CoalescingCache<String, Lectures, CatalogError> {
        &self.cache
    }

    /// Lectures published under `key`.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, shared with every concurrent caller.
    pub async fn lectures(&self, key: &str) -> Result<Lectures, CatalogError> {
        let provider = Arc::clone(&self.provider);
        let owned = key.to_string();
        self.cache
            .get(key.to_string(), move || async move {
                provider.fetch(&owned).await.map(Arc::new)
            })
            .await
    }

    /// Lectures from every key, fetched concurrently and concatenated in key
    /// order. Repeated keys share one fetch.
    ///
    /// # Errors
    ///
    /// Returns the first error among the fetches.
    pub async fn all_lectures<S: AsRef<str>>(
        &self,
        keys: &[S],
    ) -> Result<Vec<LectureRecord>, CatalogError> {
        let parts = try_join_all(keys.iter().map(|key| self.lectures(key.as_ref()))).await?;
        Ok(parts.iter().flat_map(|part| part.iter().cloned()).collect())
    }

    /// Forgets the cached resource for `key`.
    pub fn invalidate(&self, key: &str) -> bool {
        self.cache.invalidate(&key.to_string())
    }

    /// Forgets every cached resource.
    pub fn clear(&self) {
        self.cache.clear();
    }
}
