//! Keyed TTL cache for earthquake collections.
//!
//! Provides:
//! - One lockable entry per (magnitude, past) pair, fixed at construction
//! - Per-window time-to-live
//! - Bounded retries and an error breaker per entry
//! - A statistics mirror readable without touching entry locks

mod breaker;
mod builder;
mod entry;
mod key;
mod service;
mod stats;
mod ttl;

pub use breaker::{BreakerConfig, BreakerState};
pub(crate) use breaker::ErrorBreaker;
pub use builder::FeedCacheBuilder;
pub use key::CacheKey;
pub use service::{BreakerStatus, FeedCache};
pub use stats::CacheStats;
pub(crate) use stats::StatsMirror;
pub use ttl::TtlPolicy;
