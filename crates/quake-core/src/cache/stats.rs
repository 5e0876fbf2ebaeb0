//! Usage statistics and their read-mostly mirror.
//!
//! Entry locks can be held across a slow upstream call, so counters are copied
//! into a separate map behind one reader/writer lock. Readers never wait on a
//! fetch in progress. The mirror is only written on a cache hit or a
//! successful fetch.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::CacheKey;

/// Hit and fetch counters of one cache entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Successful upstream fetches.
    pub fetch_count: u64,
    /// Requests served from the cached collection.
    pub hit_count: u64,
}

/// Last published [`CacheStats`] per key.
#[derive(Debug, Default)]
pub(crate) struct StatsMirror {
    snapshots: RwLock<HashMap<CacheKey, CacheStats>>,
}

impl StatsMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot for a key.
    pub fn record(&self, key: CacheKey, stats: CacheStats) {
        let mut snapshots = self
            .snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        snapshots.insert(key, stats);
    }

    /// Read the snapshot for a key, zero if none was published yet.
    pub fn read(&self, key: &CacheKey) -> CacheStats {
        let snapshots = self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        snapshots.get(key).copied().unwrap_or_default()
    }

    /// Every published snapshot, ordered by key.
    pub fn all(&self) -> Vec<(CacheKey, CacheStats)> {
        let snapshots = self
            .snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<_> = snapshots.iter().map(|(k, v)| (*k, *v)).collect();
        all.sort_by_key(|(k, _)| *k);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Magnitude, Past};

    #[test]
    fn test_unknown_key_reads_zero() {
        let mirror = StatsMirror::new();
        let key = CacheKey::new(Magnitude::All, Past::Hour);
        assert_eq!(mirror.read(&key), CacheStats::default());
    }

    #[test]
    fn test_record_replaces_snapshot() {
        let mirror = StatsMirror::new();
        let key = CacheKey::new(Magnitude::Significant, Past::Day);

        mirror.record(key, CacheStats { fetch_count: 1, hit_count: 0 });
        mirror.record(key, CacheStats { fetch_count: 1, hit_count: 4 });

        assert_eq!(mirror.read(&key), CacheStats { fetch_count: 1, hit_count: 4 });
        assert_eq!(mirror.all().len(), 1);
    }
}
