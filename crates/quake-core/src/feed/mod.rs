//! Upstream feed collaborators.
//!
//! This module provides:
//! - The [`FeedSource`] trait the cache fetches through
//! - An HTTP source for the USGS summary feeds
//! - The GeoJSON parser turning feed bytes into collections

pub mod parser;
mod source;
mod usgs;

pub use parser::to_collection;
pub use source::FeedSource;
pub use usgs::UsgsFeedSource;
