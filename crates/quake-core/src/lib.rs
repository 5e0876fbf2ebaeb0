//! Quake Core - cached access to the USGS earthquake summary feeds.
//!
//! The feeds are keyed by a magnitude filter and a recency window. Each
//! combination gets its own cache entry with a window-dependent TTL, bounded
//! retries on fetch or parse failure, and an error breaker that stops
//! contacting a failing feed for a cooldown period.
//!
//! # Example
//!
//! ```rust,ignore
//! use quake_core::{FeedCache, Magnitude, Past};
//!
//! #[tokio::main]
//! async fn main() -> quake_core::Result<()> {
//!     let cache = FeedCache::usgs()?;
//!
//!     let latest = cache.get_collection(Magnitude::M2_5Plus, Past::Hour).await?;
//!     println!("{} earthquakes in the past hour", latest.len());
//!
//!     let quake = cache.get_by_id("us7000abcd").await?;
//!     println!("{:?}", quake.place);
//!
//!     let stats = cache.get_stats(Magnitude::M2_5Plus, Past::Hour);
//!     println!("fetched {} times, {} hits", stats.fetch_count, stats.hit_count);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;

// Re-export commonly used types
pub use cache::{
    BreakerConfig, BreakerState, BreakerStatus, CacheKey, CacheStats, FeedCache,
    FeedCacheBuilder, TtlPolicy,
};
pub use config::CacheSettings;
pub use error::{ErrorKind, QuakeError, Result};
pub use feed::{FeedSource, UsgsFeedSource};
pub use models::{CollectionMetadata, Earthquake, EarthquakeCollection, Location, Magnitude, Past};
