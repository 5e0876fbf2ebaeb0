//! The keyed TTL cache in front of the earthquake feeds.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::builder::FeedCacheBuilder;
use super::entry::Entry;
use super::breaker::BreakerState;
use super::key::CacheKey;
use super::stats::{CacheStats, StatsMirror};
use crate::config::CacheSettings;
use crate::error::{QuakeError, Result};
use crate::feed::{parser, FeedSource, UsgsFeedSource};
use crate::models::{Earthquake, EarthquakeCollection, Magnitude, Past};

/// Diagnostic view of an entry's error breaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakerStatus {
    #[serde(serialize_with = "serialize_display")]
    pub state: BreakerState,
    pub consecutive_errors: u32,
    #[serde(serialize_with = "serialize_error")]
    pub last_error: Option<QuakeError>,
}

fn serialize_display<S: serde::Serializer>(
    state: &BreakerState,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(state)
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<QuakeError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.collect_str(e),
        None => serializer.serialize_none(),
    }
}

/// Cache of parsed feed collections, one entry per (magnitude, past) pair.
///
/// Entries are allocated once when the cache is built and never removed. Each
/// entry has its own lock, held for the whole request including the upstream
/// call, so a key is fetched by at most one caller at a time. Other callers of
/// the same key wait and then see the fresh collection. Different keys never
/// contend.
///
/// # Example
///
/// ```rust,ignore
/// use quake_core::{FeedCache, Magnitude, Past};
///
/// let cache = FeedCache::usgs()?;
/// let collection = cache.get_collection(Magnitude::M4_5Plus, Past::Day).await?;
/// println!("{} earthquakes", collection.len());
/// ```
pub struct FeedCache<S> {
    source: S,
    settings: CacheSettings,
    entries: HashMap<CacheKey, Mutex<Entry>>,
    stats: StatsMirror,
}

impl FeedCache<UsgsFeedSource> {
    /// Create a cache over the public USGS feeds with default settings.
    pub fn usgs() -> Result<Self> {
        Ok(Self::new(UsgsFeedSource::new()?))
    }
}

impl<S: FeedSource> FeedCache<S> {
    /// Create a cache over the full key domain with default settings.
    pub fn new(source: S) -> Self {
        Self::builder(source).build()
    }

    /// Create a builder for more control over settings and key domain.
    pub fn builder(source: S) -> FeedCacheBuilder<S> {
        FeedCacheBuilder::new(source)
    }

    pub(crate) fn from_parts(
        source: S,
        settings: CacheSettings,
        keys: impl IntoIterator<Item = CacheKey>,
    ) -> Self {
        let entries = keys
            .into_iter()
            .map(|key| (key, Mutex::new(Entry::new())))
            .collect();
        Self {
            source,
            settings,
            entries,
            stats: StatsMirror::new(),
        }
    }

    /// The upstream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Keys this cache has entries for, sorted.
    pub fn keys(&self) -> Vec<CacheKey> {
        let mut keys: Vec<CacheKey> = self.entries.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Get the collection for a feed, from cache or upstream.
    ///
    /// Fails with [`QuakeError::CacheFailure`] for a key outside the cache's
    /// domain. Otherwise upstream failures are returned as-is: the last fetch
    /// or parse error once the attempts or the error breaker are exhausted.
    /// While the breaker is tripped the remembered error is returned without
    /// contacting upstream.
    pub async fn get_collection(
        &self,
        magnitude: Magnitude,
        past: Past,
    ) -> Result<Arc<EarthquakeCollection>> {
        let key = CacheKey::new(magnitude, past);
        let slot = self.entries.get(&key).ok_or_else(|| {
            debug!(%key, "No cache entry for key");
            QuakeError::CacheFailure
        })?;

        let mut entry = slot.lock().await;

        let now = Instant::now();
        if let Some(collection) = entry.fresh_collection(now) {
            entry.stats.hit_count += 1;
            self.stats.record(key, entry.stats);
            debug!(%key, hits = entry.stats.hit_count, "Cache hit");
            return Ok(collection);
        }

        let key_name = key.to_string();
        let breaker_config = &self.settings.breaker;
        entry.breaker.maybe_reset(breaker_config, now, &key_name);
        if entry.breaker.is_tripped(breaker_config) {
            warn!(key = %key_name, "Error breaker tripped, not contacting upstream");
        }

        let mut attempt = 0;
        while attempt < self.settings.max_tries_for_request
            && !entry.breaker.is_tripped(breaker_config)
        {
            attempt += 1;
            match self.fetch_and_parse(magnitude, past).await {
                Ok(collection) => {
                    let collection = Arc::new(collection);
                    let ttl = self.settings.ttl.ttl(magnitude, past);
                    entry.store(Arc::clone(&collection), Instant::now() + ttl);
                    entry.stats.fetch_count += 1;
                    entry.breaker.record_success();
                    self.stats.record(key, entry.stats);
                    info!(
                        key = %key_name,
                        attempt,
                        count = collection.len(),
                        ?ttl,
                        "Fetched earthquake collection"
                    );
                    return Ok(collection);
                }
                Err(e) => {
                    warn!(
                        key = %key_name,
                        attempt,
                        max_attempts = self.settings.max_tries_for_request,
                        error = %e,
                        "Fetching earthquake collection failed"
                    );
                    entry
                        .breaker
                        .record_failure(breaker_config, e, Instant::now(), &key_name);
                }
            }
        }

        Err(entry
            .breaker
            .last_error()
            .cloned()
            .unwrap_or(QuakeError::CacheFailure))
    }

    /// Find a single earthquake by identifier.
    ///
    /// Searches the all-magnitudes feeds from the narrowest window to the
    /// widest and returns the first match. Windows that fail are skipped; if
    /// nothing matched, the last such failure is returned, or
    /// [`QuakeError::NotFound`] if every window was searched successfully.
    pub async fn get_by_id(&self, id: &str) -> Result<Earthquake> {
        let mut last_error = None;

        for past in Past::FAN_OUT {
            match self.get_collection(Magnitude::All, past).await {
                Ok(collection) => {
                    if let Some(eq) = collection.find_by_id(id) {
                        return Ok(eq.clone());
                    }
                }
                Err(e) => {
                    debug!(id, %past, error = %e, "Window unavailable for lookup");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| QuakeError::NotFound { id: id.to_string() }))
    }

    /// Latest published statistics for a feed. Zero for unqueried or unknown keys.
    pub fn get_stats(&self, magnitude: Magnitude, past: Past) -> CacheStats {
        self.stats.read(&CacheKey::new(magnitude, past))
    }

    /// Statistics of every key that has served at least one request.
    pub fn all_stats(&self) -> Vec<(CacheKey, CacheStats)> {
        self.stats.all()
    }

    /// Current breaker state of a feed.
    ///
    /// Takes the entry lock, so this waits for an in-flight fetch of the key.
    pub async fn breaker_status(
        &self,
        magnitude: Magnitude,
        past: Past,
    ) -> Result<BreakerStatus> {
        let key = CacheKey::new(magnitude, past);
        let slot = self.entries.get(&key).ok_or(QuakeError::CacheFailure)?;
        let entry = slot.lock().await;
        Ok(BreakerStatus {
            state: entry.breaker.state(&self.settings.breaker),
            consecutive_errors: entry.breaker.consecutive_errors(),
            last_error: entry.breaker.last_error().cloned(),
        })
    }

    async fn fetch_and_parse(
        &self,
        magnitude: Magnitude,
        past: Past,
    ) -> Result<EarthquakeCollection> {
        let data = self.source.fetch(magnitude, past).await?;
        parser::to_collection(&data, true)
    }
}
