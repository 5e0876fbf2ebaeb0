//! Earthquake records and collections as served by the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Epicenter position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    /// Depth in kilometers, when reported.
    #[serde(default)]
    pub depth_km: Option<f64>,
}

/// A single earthquake event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Earthquake {
    /// Stable event identifier, unique across feeds (e.g. `us7000abcd`).
    pub id: String,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub magnitude_type: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tsunami: bool,
    #[serde(default)]
    pub significance: Option<i64>,
    pub location: Location,
}

/// Feed-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMetadata {
    #[serde(default)]
    pub generated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub count: usize,
}

/// An ordered collection of earthquakes for one feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeCollection {
    pub metadata: CollectionMetadata,
    pub features: Vec<Earthquake>,
}

impl EarthquakeCollection {
    /// Find an earthquake by its identifier.
    pub fn find_by_id(&self, id: &str) -> Option<&Earthquake> {
        self.features.iter().find(|eq| eq.id == id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quake(id: &str) -> Earthquake {
        Earthquake {
            id: id.to_string(),
            magnitude: Some(2.1),
            magnitude_type: Some("ml".into()),
            place: Some("10 km N of Somewhere".into()),
            time: DateTime::<Utc>::from_timestamp_millis(1_600_000_000_000).unwrap(),
            updated: None,
            url: None,
            title: None,
            status: Some("reviewed".into()),
            tsunami: false,
            significance: Some(68),
            location: Location {
                longitude: -150.0,
                latitude: 61.0,
                depth_km: Some(12.5),
            },
        }
    }

    #[test]
    fn test_find_by_id() {
        let collection = EarthquakeCollection {
            metadata: CollectionMetadata::default(),
            features: vec![quake("ak1"), quake("us2")],
        };
        assert_eq!(collection.find_by_id("us2").map(|eq| eq.id.as_str()), Some("us2"));
        assert!(collection.find_by_id("nc3").is_none());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(quake("ak1")).unwrap();
        assert_eq!(json["magnitudeType"], "ml");
        assert_eq!(json["location"]["depthKm"], 12.5);
    }
}
