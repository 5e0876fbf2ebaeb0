//! Builder for configuring a [`FeedCache`].

use super::{CacheKey, FeedCache};
use crate::config::CacheSettings;
use crate::feed::FeedSource;
use crate::models::{Magnitude, Past};

/// Builder for configuring a [`FeedCache`].
///
/// # Example
///
/// ```rust,ignore
/// use quake_core::{CacheSettings, FeedCache, Magnitude, Past, UsgsFeedSource};
///
/// let cache = FeedCache::builder(UsgsFeedSource::new()?)
///     .settings(CacheSettings::new().with_max_tries(5))
///     .domain([Magnitude::All], Past::ALL_VALUES)
///     .build();
/// ```
pub struct FeedCacheBuilder<S> {
    source: S,
    settings: CacheSettings,
    magnitudes: Vec<Magnitude>,
    pasts: Vec<Past>,
}

impl<S: FeedSource> FeedCacheBuilder<S> {
    /// Create a builder for the given upstream source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            settings: CacheSettings::default(),
            magnitudes: Magnitude::ALL_VALUES.to_vec(),
            pasts: Past::ALL_VALUES.to_vec(),
        }
    }

    /// Use custom retry, breaker and TTL settings.
    ///
    /// Default: [`CacheSettings::default()`]
    pub fn settings(mut self, settings: CacheSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Restrict the valid magnitude and past values.
    ///
    /// One entry is allocated per pair of the cross-product. Requests for any
    /// other pair fail with `CacheFailure`.
    ///
    /// Default: every magnitude × every past window
    pub fn domain(
        mut self,
        magnitudes: impl IntoIterator<Item = Magnitude>,
        pasts: impl IntoIterator<Item = Past>,
    ) -> Self {
        self.magnitudes = magnitudes.into_iter().collect();
        self.pasts = pasts.into_iter().collect();
        self
    }

    /// Build the cache, allocating every entry up front.
    pub fn build(self) -> FeedCache<S> {
        let keys = CacheKey::cross_product(&self.magnitudes, &self.pasts);
        FeedCache::from_parts(self.source, self.settings, keys)
    }
}
