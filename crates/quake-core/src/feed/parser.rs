//! GeoJSON parsing for USGS summary feeds.
//!
//! The feed is a `FeatureCollection` of `Point` features whose properties carry
//! the event attributes. Timestamps are epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{QuakeError, Result};
use crate::models::{CollectionMetadata, Earthquake, EarthquakeCollection, Location};

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    generated: Option<i64>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    properties: RawProperties,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProperties {
    #[serde(default)]
    mag: Option<f64>,
    #[serde(default)]
    mag_type: Option<String>,
    #[serde(default)]
    place: Option<String>,
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    updated: Option<i64>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    tsunami: Option<i64>,
    #[serde(default)]
    sig: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Parse a raw feed document into an [`EarthquakeCollection`].
///
/// In strict mode any malformed feature fails the whole document. Otherwise
/// malformed features are skipped. Invalid JSON fails in both modes.
pub fn to_collection(data: &[u8], strict: bool) -> Result<EarthquakeCollection> {
    let raw: RawCollection = serde_json::from_slice(data)?;

    if strict && raw.kind.as_deref() != Some("FeatureCollection") {
        return Err(QuakeError::parse(format!(
            "expected FeatureCollection, got {:?}",
            raw.kind
        )));
    }

    let mut features = Vec::with_capacity(raw.features.len());
    for (index, feature) in raw.features.into_iter().enumerate() {
        match to_earthquake(feature) {
            Ok(eq) => features.push(eq),
            Err(e) if strict => {
                return Err(QuakeError::parse(format!("feature {}: {}", index, e)));
            }
            Err(e) => debug!(index, error = %e, "Skipping malformed feature"),
        }
    }

    let metadata = raw
        .metadata
        .map(|m| CollectionMetadata {
            generated: m.generated.and_then(DateTime::<Utc>::from_timestamp_millis),
            url: m.url,
            title: m.title,
            status: m.status,
            count: features.len(),
        })
        .unwrap_or_else(|| CollectionMetadata {
            count: features.len(),
            ..Default::default()
        });

    Ok(EarthquakeCollection { metadata, features })
}

fn to_earthquake(feature: RawFeature) -> std::result::Result<Earthquake, String> {
    if feature.kind.as_deref() != Some("Feature") {
        return Err(format!("expected Feature, got {:?}", feature.kind));
    }

    let id = feature
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| "missing id".to_string())?;

    let geometry = feature
        .geometry
        .ok_or_else(|| format!("{}: missing geometry", id))?;
    if geometry.kind.as_deref() != Some("Point") || geometry.coordinates.len() < 2 {
        return Err(format!("{}: expected Point geometry", id));
    }

    let props = feature.properties;
    let time = props
        .time
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| format!("{}: missing or invalid time", id))?;

    Ok(Earthquake {
        magnitude: props.mag,
        magnitude_type: props.mag_type,
        place: props.place,
        time,
        updated: props.updated.and_then(DateTime::<Utc>::from_timestamp_millis),
        url: props.url,
        title: props.title,
        status: props.status,
        tsunami: props.tsunami.unwrap_or(0) != 0,
        significance: props.sig,
        location: Location {
            longitude: geometry.coordinates[0],
            latitude: geometry.coordinates[1],
            depth_km: geometry.coordinates.get(2).copied(),
        },
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {
            "generated": 1600000000000,
            "url": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson",
            "title": "USGS All Earthquakes, Past Hour",
            "status": 200,
            "api": "1.10.3",
            "count": 2
        },
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "mag": 1.6, "place": "12 km SSW of Big Lake, Alaska",
                    "time": 1599999000000, "updated": 1599999100000,
                    "url": "https://earthquake.usgs.gov/earthquakes/eventpage/ak020bnbu6xq",
                    "status": "automatic", "tsunami": 0, "sig": 39, "magType": "ml",
                    "title": "M 1.6 - 12 km SSW of Big Lake, Alaska"
                },
                "geometry": {"type": "Point", "coordinates": [-150.0459, 61.4092, 28.4]},
                "id": "ak020bnbu6xq"
            },
            {
                "type": "Feature",
                "properties": {"mag": 4.8, "time": 1599998000000, "tsunami": 1},
                "geometry": {"type": "Point", "coordinates": [142.1, 38.3]},
                "id": "us6000bxyz"
            }
        ]
    }"#;

    #[test]
    fn test_parse_feed() {
        let collection = to_collection(FEED.as_bytes(), true).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.metadata.count, 2);
        assert_eq!(collection.metadata.status, Some(200));

        let first = &collection.features[0];
        assert_eq!(first.id, "ak020bnbu6xq");
        assert_eq!(first.magnitude, Some(1.6));
        assert_eq!(first.magnitude_type.as_deref(), Some("ml"));
        assert_eq!(first.location.depth_km, Some(28.4));
        assert_eq!(first.time.timestamp_millis(), 1_599_999_000_000);

        let second = &collection.features[1];
        assert!(second.tsunami);
        assert_eq!(second.location.depth_km, None);
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = to_collection(b"{\"type\": ", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_strict_rejects_wrong_document_type() {
        let doc = br#"{"type": "Feature", "features": []}"#;
        assert!(to_collection(doc, true).is_err());
        assert!(to_collection(doc, false).unwrap().is_empty());
    }

    #[test]
    fn test_strict_rejects_malformed_feature_lenient_skips_it() {
        let doc = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "", "properties": {"time": 1}, "geometry": {"type": "Point", "coordinates": [1, 2]}},
                {"type": "Feature", "id": "ok1", "properties": {"time": 1}, "geometry": {"type": "Point", "coordinates": [1, 2]}}
            ]
        }"#;

        let err = to_collection(doc, true).unwrap_err();
        assert!(err.to_string().contains("feature 0"));

        let lenient = to_collection(doc, false).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient.features[0].id, "ok1");
    }

    #[test]
    fn test_missing_geometry_is_malformed() {
        let doc = br#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "id": "x1", "properties": {"time": 1}}
        ]}"#;
        assert!(to_collection(doc, true).is_err());
    }
}
