//! Per-entry error breaker.
//!
//! Stops hammering a failing feed once too many consecutive fetch or parse
//! failures pile up:
//! - HEALTHY: fetches are attempted
//! - TRIPPED: fetches are skipped and the last failure is reported
//!
//! There is no timer. A tripped breaker is only re-evaluated when the next
//! request for its key arrives, and resets if the cooldown has elapsed since
//! the last failure.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::config::CacheConfig;
use crate::error::QuakeError;

/// Breaker states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Fewer than `max_errors_total` consecutive failures.
    Healthy,
    /// Failure threshold reached, cooling down.
    Tripped,
}

impl std::fmt::Display for BreakerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakerState::Healthy => write!(f, "HEALTHY"),
            BreakerState::Tripped => write!(f, "TRIPPED"),
        }
    }
}

/// Configuration for breaker behavior.
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures that trip the breaker.
    pub max_errors_total: u32,
    /// Quiet period after the last failure before a tripped breaker resets.
    pub wait_before_reset: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            max_errors_total: CacheConfig::MAX_ERRORS_TOTAL,
            wait_before_reset: CacheConfig::WAIT_BEFORE_RESET,
        }
    }
}

/// Failure bookkeeping for one cache entry.
///
/// Not synchronized on its own; it lives inside the entry and is only touched
/// while the entry lock is held.
#[derive(Debug, Default)]
pub(crate) struct ErrorBreaker {
    /// Failures since the last success or reset.
    consecutive_errors: u32,
    /// When the most recent failure happened.
    last_error_at: Option<Instant>,
    /// The most recent failure.
    last_error: Option<QuakeError>,
}

impl ErrorBreaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state under the given configuration.
    pub fn state(&self, config: &BreakerConfig) -> BreakerState {
        if self.consecutive_errors >= config.max_errors_total {
            BreakerState::Tripped
        } else {
            BreakerState::Healthy
        }
    }

    pub fn is_tripped(&self, config: &BreakerConfig) -> bool {
        self.state(config) == BreakerState::Tripped
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    pub fn last_error(&self) -> Option<&QuakeError> {
        self.last_error.as_ref()
    }

    /// Reset a tripped breaker whose cooldown has elapsed.
    ///
    /// Returns `true` if the breaker was reset.
    pub fn maybe_reset(&mut self, config: &BreakerConfig, now: Instant, key: &str) -> bool {
        if !self.is_tripped(config) {
            return false;
        }

        let cooled_down = self
            .last_error_at
            .map(|at| now >= at + config.wait_before_reset)
            .unwrap_or(true);
        if cooled_down {
            info!(
                key,
                errors = self.consecutive_errors,
                "Error breaker reset after cooldown"
            );
            self.consecutive_errors = 0;
            self.last_error = None;
        }
        cooled_down
    }

    /// Record a failed fetch or parse.
    pub fn record_failure(
        &mut self,
        config: &BreakerConfig,
        error: QuakeError,
        now: Instant,
        key: &str,
    ) {
        let was_tripped = self.is_tripped(config);
        self.consecutive_errors += 1;
        self.last_error_at = Some(now);
        self.last_error = Some(error);

        if !was_tripped && self.is_tripped(config) {
            warn!(
                key,
                errors = self.consecutive_errors,
                cooldown = ?config.wait_before_reset,
                "Error breaker tripped"
            );
        }
    }

    /// Record a successful fetch and parse.
    pub fn record_success(&mut self) {
        self.consecutive_errors = 0;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threshold: u32) -> BreakerConfig {
        BreakerConfig {
            max_errors_total: threshold,
            wait_before_reset: Duration::from_secs(60),
        }
    }

    fn network_error(n: u32) -> QuakeError {
        QuakeError::Network {
            message: format!("failure {}", n),
            status_code: None,
        }
    }

    #[test]
    fn test_breaker_starts_healthy() {
        let breaker = ErrorBreaker::new();
        assert_eq!(breaker.state(&config(3)), BreakerState::Healthy);
        assert_eq!(breaker.consecutive_errors(), 0);
        assert!(breaker.last_error().is_none());
    }

    #[test]
    fn test_breaker_trips_at_threshold() {
        let config = config(3);
        let mut breaker = ErrorBreaker::new();
        let now = Instant::now();

        breaker.record_failure(&config, network_error(1), now, "k");
        breaker.record_failure(&config, network_error(2), now, "k");
        assert_eq!(breaker.state(&config), BreakerState::Healthy);
        breaker.record_failure(&config, network_error(3), now, "k");
        assert_eq!(breaker.state(&config), BreakerState::Tripped);
        assert_eq!(breaker.last_error(), Some(&network_error(3)));
    }

    #[test]
    fn test_success_clears_errors() {
        let config = config(3);
        let mut breaker = ErrorBreaker::new();
        let now = Instant::now();

        breaker.record_failure(&config, network_error(1), now, "k");
        breaker.record_failure(&config, network_error(2), now, "k");
        breaker.record_success();
        breaker.record_failure(&config, network_error(3), now, "k");
        assert_eq!(breaker.consecutive_errors(), 1);
        assert_eq!(breaker.state(&config), BreakerState::Healthy);
    }

    #[test]
    fn test_reset_waits_for_cooldown() {
        let config = config(2);
        let mut breaker = ErrorBreaker::new();
        let failed_at = Instant::now();

        breaker.record_failure(&config, network_error(1), failed_at, "k");
        breaker.record_failure(&config, network_error(2), failed_at, "k");

        assert!(!breaker.maybe_reset(&config, failed_at + Duration::from_secs(59), "k"));
        assert!(breaker.is_tripped(&config));
        assert_eq!(breaker.last_error(), Some(&network_error(2)));

        assert!(breaker.maybe_reset(&config, failed_at + Duration::from_secs(60), "k"));
        assert_eq!(breaker.state(&config), BreakerState::Healthy);
        assert_eq!(breaker.consecutive_errors(), 0);
        assert!(breaker.last_error().is_none());
    }

    #[test]
    fn test_healthy_breaker_is_not_reset() {
        let config = config(3);
        let mut breaker = ErrorBreaker::new();
        let now = Instant::now();

        breaker.record_failure(&config, network_error(1), now, "k");
        assert!(!breaker.maybe_reset(&config, now + Duration::from_secs(3600), "k"));
        assert_eq!(breaker.consecutive_errors(), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(BreakerState::Healthy.to_string(), "HEALTHY");
        assert_eq!(BreakerState::Tripped.to_string(), "TRIPPED");
    }
}
