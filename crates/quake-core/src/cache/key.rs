//! Cache key resolution.

use serde::{Deserialize, Serialize};

use crate::models::{Magnitude, Past};

/// Composite key identifying one feed, and so one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub magnitude: Magnitude,
    pub past: Past,
}

impl CacheKey {
    pub fn new(magnitude: Magnitude, past: Past) -> Self {
        Self { magnitude, past }
    }

    /// Every key of the full magnitude × past cross-product.
    pub fn all() -> impl Iterator<Item = CacheKey> {
        Self::cross_product(&Magnitude::ALL_VALUES, &Past::ALL_VALUES)
    }

    /// Every key pairing one of `magnitudes` with one of `pasts`.
    pub fn cross_product<'a>(
        magnitudes: &'a [Magnitude],
        pasts: &'a [Past],
    ) -> impl Iterator<Item = CacheKey> + 'a {
        magnitudes.iter().flat_map(move |&magnitude| {
            pasts.iter().map(move |&past| CacheKey::new(magnitude, past))
        })
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.magnitude.as_str(), self.past.as_str())
    }
}
