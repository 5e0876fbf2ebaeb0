//! Data models for the earthquake feeds.

mod dimensions;
mod earthquake;

pub use dimensions::{Magnitude, Past};
pub use earthquake::{CollectionMetadata, Earthquake, EarthquakeCollection, Location};
