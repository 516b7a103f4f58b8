// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request coalescing for keyed fetches.
//!
//! The cache stores the in-flight operation itself, so every caller asking
//! for a key while its fetch is running attaches to that fetch instead of
//! starting another one. Resolved values stay until invalidated; failures are
//! reported to every attached caller and then evicted so the next call
//! retries.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

/// A fetch shared between every caller of the same key.
pub type SharedFetch<V, E> = Shared<BoxFuture<'static, Result<V, E>>>;

/// Memoizes pending and resolved fetches by key.
///
/// The cache is an owned object; clone it to share the same entries.
pub struct CoalescingCache<K, V, E> {
    inner: Arc<Inner<K, V, E>>,
}

struct Inner<K, V, E> {
    entries: Mutex<Entries<K, V, E>>,
}

struct Entries<K, V, E> {
    slots: HashMap<K, Slot<V, E>>,
    next_generation: u64,
}

struct Slot<V, E> {
    generation: u64,
    fetch: SharedFetch<V, E>,
}

impl<K, V, E> CoalescingCache<K, V, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(Entries {
                    slots: HashMap::new(),
                    next_generation: 0,
                }),
            }),
        }
    }

    /// Returns the shared fetch for `key`, starting one with `fetch` if no
    /// entry exists.
    ///
    /// Lookup and insertion happen under a single lock, so two simultaneous
    /// callers never both start a fetch. `fetch` is only invoked on a miss and
    /// must not call back into the cache. The returned future runs the fetch
    /// once the first caller polls it; dropping a caller leaves the entry in
    /// place for the others.
    pub fn get<F, Fut>(&self, key: K, fetch: F) -> SharedFetch<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let mut entries = self.inner.lock();
        if let Some(slot) = entries.slots.get(&key) {
            tracing::trace!(generation = slot.generation, "attach to existing fetch");
            return slot.fetch.clone();
        }

        let generation = entries.next_generation;
        entries.next_generation += 1;

        let weak: Weak<Inner<K, V, E>> = Arc::downgrade(&self.inner);
        let owned_key = key.clone();
        let pending = fetch();
        let shared = async move {
            let result = pending.await;
            if result.is_err() {
                // the cache may already be gone
                if let Some(inner) = weak.upgrade() {
                    inner.evict(&owned_key, generation);
                }
            }
            result
        }
        .boxed()
        .shared();

        tracing::debug!(generation, "start fetch");
        entries.slots.insert(
            key,
            Slot {
                generation,
                fetch: shared.clone(),
            },
        );
        shared
    }

    /// Drops the entry for `key`. Returns whether an entry existed.
    ///
    /// A fetch still running for the dropped entry completes for its attached
    /// callers, but never touches an entry created after the invalidation.
    pub fn invalidate(&self, key: &K) -> bool {
        self.inner.lock().slots.remove(key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.inner.lock().slots.clear();
    }

    /// Number of pending or resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().slots.len()
    }

    /// Whether the cache has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().slots.contains_key(key)
    }
}

impl<K, V, E> Inner<K, V, E>
where
    K: Eq + Hash,
{
    fn lock(&self) -> MutexGuard<'_, Entries<K, V, E>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict(&self, key: &K, generation: u64) {
        let mut entries = self.lock();
        if entries
            .slots
            .get(key)
            .is_some_and(|slot| slot.generation == generation)
        {
            tracing::debug!(generation, "evict failed fetch");
            entries.slots.remove(key);
        }
    }
}

impl<K, V, E> Default for CoalescingCache<K, V, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> Clone for CoalescingCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, E> fmt::Debug for CoalescingCache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .inner
            .entries
            .lock()
            .map_or_else(|e| e.into_inner().slots.len(), |e| e.slots.len());
        f.debug_struct("CoalescingCache")
            .field("entries", &len)
            .finish()
    }
}
