//! Time-to-live policy for cached collections.
//!
//! Narrow windows churn faster, so they expire sooner. The magnitude filter
//! has no influence on freshness.

use std::time::Duration;

use crate::config::CacheConfig;
use crate::models::{Magnitude, Past};

/// Freshness per recency window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlPolicy {
    pub hour: Duration,
    pub day: Duration,
    pub seven_days: Duration,
    pub thirty_days: Duration,
    /// Used for the unspecified window.
    pub fallback: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            hour: CacheConfig::TTL_PAST_HOUR,
            day: CacheConfig::TTL_PAST_DAY,
            seven_days: CacheConfig::TTL_PAST_7DAYS,
            thirty_days: CacheConfig::TTL_PAST_30DAYS,
            fallback: CacheConfig::TTL_FALLBACK,
        }
    }
}

impl TtlPolicy {
    /// A policy using the same TTL for every window.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            hour: ttl,
            day: ttl,
            seven_days: ttl,
            thirty_days: ttl,
            fallback: ttl,
        }
    }

    /// How long a freshly fetched collection stays valid.
    pub fn ttl(&self, _magnitude: Magnitude, past: Past) -> Duration {
        match past {
            Past::Hour => self.hour,
            Past::Day => self.day,
            Past::SevenDays => self.seven_days,
            Past::ThirtyDays => self.thirty_days,
            Past::Unspecified => self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttls() {
        let policy = TtlPolicy::default();
        let mins = |m: u64| Duration::from_secs(m * 60);
        assert_eq!(policy.ttl(Magnitude::All, Past::Hour), mins(3));
        assert_eq!(policy.ttl(Magnitude::All, Past::Day), mins(5));
        assert_eq!(policy.ttl(Magnitude::All, Past::SevenDays), mins(10));
        assert_eq!(policy.ttl(Magnitude::All, Past::ThirtyDays), mins(15));
        assert_eq!(policy.ttl(Magnitude::All, Past::Unspecified), mins(15));
    }

    #[test]
    fn test_uniform_policy() {
        let policy = TtlPolicy::uniform(Duration::from_secs(42));
        for past in Past::ALL_VALUES {
            assert_eq!(policy.ttl(Magnitude::Significant, past), Duration::from_secs(42));
        }
    }

    #[test]
    fn test_magnitude_does_not_affect_ttl() {
        let policy = TtlPolicy::default();
        for past in Past::ALL_VALUES {
            let expected = policy.ttl(Magnitude::All, past);
            for magnitude in Magnitude::ALL_VALUES {
                assert_eq!(policy.ttl(magnitude, past), expected);
            }
        }
    }
}
