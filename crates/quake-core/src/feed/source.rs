//! Upstream feed abstraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Magnitude, Past};

/// Source of raw feed documents.
///
/// Implementations perform a single request per call. Retrying and caching
/// are the cache's job, not the source's.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw feed body for a magnitude filter and recency window.
    async fn fetch(&self, magnitude: Magnitude, past: Past) -> Result<Vec<u8>>;
}
