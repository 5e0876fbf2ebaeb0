//! Centralized configuration for the quake feed cache.
//!
//! Constants live on unit structs grouped by concern. [`CacheSettings`] is the
//! runtime value handed to a cache instance and defaults to these constants.

use std::time::Duration;

use crate::cache::{BreakerConfig, TtlPolicy};

/// Upstream feed configuration.
pub struct FeedConfig;

impl FeedConfig {
    pub const USGS_FEED_BASE: &'static str =
        "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = concat!("quake-core/", env!("CARGO_PKG_VERSION"));
}

/// Cache behavior defaults.
pub struct CacheConfig;

impl CacheConfig {
    pub const MAX_TRIES_FOR_REQUEST: u32 = 3;
    pub const MAX_ERRORS_TOTAL: u32 = 10;
    pub const WAIT_BEFORE_RESET: Duration = Duration::from_secs(3600);

    // Freshness per recency window
    pub const TTL_PAST_HOUR: Duration = Duration::from_secs(3 * 60);
    pub const TTL_PAST_DAY: Duration = Duration::from_secs(5 * 60);
    pub const TTL_PAST_7DAYS: Duration = Duration::from_secs(10 * 60);
    pub const TTL_PAST_30DAYS: Duration = Duration::from_secs(15 * 60);
    pub const TTL_FALLBACK: Duration = Duration::from_secs(15 * 60);
}

/// Runtime settings for a [`FeedCache`](crate::FeedCache).
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Fetch-then-parse attempts per `get` call.
    pub max_tries_for_request: u32,
    /// Error breaker thresholds.
    pub breaker: BreakerConfig,
    /// Time-to-live per key.
    pub ttl: TtlPolicy,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_tries_for_request: CacheConfig::MAX_TRIES_FOR_REQUEST,
            breaker: BreakerConfig::default(),
            ttl: TtlPolicy::default(),
        }
    }
}

impl CacheSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of attempts per request.
    pub fn with_max_tries(mut self, tries: u32) -> Self {
        self.max_tries_for_request = tries;
        self
    }

    /// Set the consecutive error count that trips the breaker.
    pub fn with_max_errors_total(mut self, max_errors: u32) -> Self {
        self.breaker.max_errors_total = max_errors;
        self
    }

    /// Set the cooldown after which a tripped breaker resets.
    pub fn with_wait_before_reset(mut self, wait: Duration) -> Self {
        self.breaker.wait_before_reset = wait;
        self
    }

    /// Replace the TTL policy.
    pub fn with_ttl_policy(mut self, ttl: TtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = CacheSettings::default();
        assert_eq!(settings.max_tries_for_request, 3);
        assert_eq!(settings.breaker.max_errors_total, 10);
        assert_eq!(settings.breaker.wait_before_reset, Duration::from_secs(3600));
    }

    #[test]
    fn test_builder_setters() {
        let settings = CacheSettings::new()
            .with_max_tries(5)
            .with_max_errors_total(2)
            .with_wait_before_reset(Duration::from_secs(10));
        assert_eq!(settings.max_tries_for_request, 5);
        assert_eq!(settings.breaker.max_errors_total, 2);
        assert_eq!(settings.breaker.wait_before_reset, Duration::from_secs(10));
    }

    #[test]
    fn test_user_agent_has_version() {
        assert!(FeedConfig::USER_AGENT.starts_with("quake-core/"));
        assert!(FeedConfig::REQUEST_TIMEOUT > Duration::ZERO);
    }
}
