// src/enrich.rs
//! Link enrichment cache: per-role search links fetched at most once per
//! title, with explicit pending/ready/failed entry state.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::client::ServiceClient;
use crate::error::EngineError;
use crate::types::SearchLink;

/// Fetch seam for the cache, implemented by the service client and by
/// counting doubles in tests.
pub trait LinkFetcher: Send + Sync + 'static {
    fn fetch_links(
        &self,
        role: &str,
    ) -> impl Future<Output = Result<Vec<SearchLink>, EngineError>> + Send;
}

impl LinkFetcher for ServiceClient {
    async fn fetch_links(&self, role: &str) -> Result<Vec<SearchLink>, EngineError> {
        self.search_links(role).await
    }
}

/// Lifecycle of one cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Pending,
    Ready(Vec<SearchLink>),
    Failed(String),
}

/// How role titles map to cache keys.
///
/// The parser performs no normalization, so under `Exact` two
/// differently-capitalized spellings of the same role are distinct
/// entries. That is the documented default; `CaseInsensitive` folds them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    #[default]
    Exact,
    CaseInsensitive,
}

pub struct LinkCache<F: LinkFetcher> {
    fetcher: Arc<F>,
    entries: Arc<Mutex<HashMap<String, LinkState>>>,
    /// Bumped by `invalidate`. In-flight fetches snapshot the epoch at
    /// start and drop their result if it moved, so a torn-down requester
    /// never receives a stale merge.
    epoch: Arc<AtomicU64>,
    key_policy: KeyPolicy,
}

impl<F: LinkFetcher> Clone for LinkCache<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            entries: Arc::clone(&self.entries),
            epoch: Arc::clone(&self.epoch),
            key_policy: self.key_policy,
        }
    }
}

impl<F: LinkFetcher> LinkCache<F> {
    pub fn new(fetcher: F, key_policy: KeyPolicy) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            entries: Arc::new(Mutex::new(HashMap::new())),
            epoch: Arc::new(AtomicU64::new(0)),
            key_policy,
        }
    }

    /// Return the current state for `title` without blocking, starting a
    /// single asynchronous fetch if none was ever started for its key.
    ///
    /// Re-invocation while an entry exists (pending, ready, or failed) is
    /// a no-op: the check-then-set below happens under the lock, before
    /// the fetch's first suspension point, so at most one lookup per key
    /// is ever in flight. A failed entry stays failed until [`Self::retry`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn ensure_links(&self, title: &str) -> LinkState {
        let key = self.cache_key(title);

        {
            let mut entries = self.entries.lock().expect("link cache lock poisoned");
            if let Some(state) = entries.get(&key) {
                return state.clone();
            }
            entries.insert(key.clone(), LinkState::Pending);
        }

        let fetcher = Arc::clone(&self.fetcher);
        let entries = Arc::clone(&self.entries);
        let epoch = Arc::clone(&self.epoch);
        let started_epoch = epoch.load(Ordering::SeqCst);
        let title = title.to_string();

        tokio::spawn(async move {
            let outcome = fetcher.fetch_links(&title).await;

            let state = match outcome {
                Ok(links) => LinkState::Ready(links),
                Err(e) => {
                    warn!("Link lookup failed for '{}': {}", title, e);
                    LinkState::Failed(e.to_string())
                }
            };

            // The epoch is read under the entries lock: `invalidate` bumps
            // the epoch before it takes the lock to clear, so either this
            // check sees the bump and drops the result, or the insert lands
            // first and the clear removes it.
            let mut entries = entries.lock().expect("link cache lock poisoned");
            if epoch.load(Ordering::SeqCst) != started_epoch {
                debug!("Discarding stale link result for '{}'", title);
                return;
            }
            entries.insert(key, state);
        });

        LinkState::Pending
    }

    /// Current state for `title`, if any fetch was ever started for it.
    pub fn peek(&self, title: &str) -> Option<LinkState> {
        let key = self.cache_key(title);
        let entries = self.entries.lock().expect("link cache lock poisoned");
        entries.get(&key).cloned()
    }

    /// Drop a failed entry and start a fresh fetch. Retry is on demand
    /// only; `ensure_links` never re-arms a failure by itself.
    pub fn retry(&self, title: &str) -> LinkState {
        let key = self.cache_key(title);
        {
            let mut entries = self.entries.lock().expect("link cache lock poisoned");
            if matches!(entries.get(&key), Some(LinkState::Failed(_))) {
                entries.remove(&key);
            }
        }
        self.ensure_links(title)
    }

    /// Tear down the cache for a departing requester: clear all entries
    /// and ensure in-flight completions are discarded on arrival.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().expect("link cache lock poisoned");
        entries.clear();
    }

    /// Number of entries still awaiting their fetch.
    pub fn pending_count(&self) -> usize {
        let entries = self.entries.lock().expect("link cache lock poisoned");
        entries
            .values()
            .filter(|state| matches!(state, LinkState::Pending))
            .count()
    }

    fn cache_key(&self, title: &str) -> String {
        match self.key_policy {
            KeyPolicy::Exact => title.to_string(),
            KeyPolicy::CaseInsensitive => title.to_lowercase(),
        }
    }
}
