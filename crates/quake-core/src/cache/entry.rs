//! A single cache slot.

use std::sync::Arc;
use tokio::time::Instant;

use super::{CacheStats, ErrorBreaker};
use crate::models::EarthquakeCollection;

/// State of one key. Always accessed through its entry lock.
#[derive(Debug)]
pub(crate) struct Entry {
    collection: Option<Arc<EarthquakeCollection>>,
    expires_at: Instant,
    pub(crate) breaker: ErrorBreaker,
    pub(crate) stats: CacheStats,
}

impl Entry {
    pub(crate) fn new() -> Self {
        Self {
            collection: None,
            expires_at: Instant::now(),
            breaker: ErrorBreaker::new(),
            stats: CacheStats::default(),
        }
    }

    /// The cached collection if it is still valid at `now`.
    ///
    /// An expired collection is dropped.
    pub(crate) fn fresh_collection(&mut self, now: Instant) -> Option<Arc<EarthquakeCollection>> {
        if self.collection.is_some() && now >= self.expires_at {
            self.collection = None;
        }
        self.collection.clone()
    }

    /// Replace the cached collection.
    pub(crate) fn store(&mut self, collection: Arc<EarthquakeCollection>, expires_at: Instant) {
        self.collection = Some(collection);
        self.expires_at = expires_at;
    }
}
