//! GeoJSON document parsing and validation
//!
//! Parsing is eager for the document shape (top-level `type` and `features`)
//! and lazy for individual features: a feature that fails to decode is
//! reported per-feature during processing instead of failing the whole
//! document.

use crate::core::geo::GeoPoint;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// A structurally validated `FeatureCollection`.
///
/// Features are kept as raw JSON values, preserving input order, and decoded
/// one at a time via [`Feature::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonDocument {
    features: Vec<serde_json::Value>,
}

impl GeoJsonDocument {
    /// Parses and validates raw bytes as a `FeatureCollection`.
    ///
    /// Fails with [`Error::MalformedJson`] when the bytes are not well-formed
    /// JSON, and with [`Error::InvalidGeoJson`] when the top-level `type` is
    /// not `"FeatureCollection"` or `features` is not an array. There is no
    /// partial acceptance; individual features are not validated here.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(Error::MalformedJson)?;

        let is_feature_collection = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|t| t == "FeatureCollection");
        if !is_feature_collection {
            return Err(Error::InvalidGeoJson(
                "top-level type must be \"FeatureCollection\"".to_string(),
            ));
        }

        match value.get("features").and_then(serde_json::Value::as_array) {
            Some(features) => Ok(Self {
                features: features.clone(),
            }),
            None => Err(Error::InvalidGeoJson(
                "\"features\" must be an array".to_string(),
            )),
        }
    }

    /// Number of features in document order, used as the progress denominator
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Raw features in input order
    pub fn raw_features(&self) -> &[serde_json::Value] {
        &self.features
    }
}

/// GeoJSON geometry restricted to the types the importer understands.
/// Every other geometry type decodes to `Unsupported` and is skipped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: Vec<f64>,
    },
    LineString {
        coordinates: Vec<Vec<f64>>,
    },
    #[serde(other)]
    Unsupported,
}

/// A single decoded feature with geometry and open properties
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

impl Feature {
    /// Decodes one raw feature value. Shape problems here are per-feature
    /// and are handled by skipping the feature, not failing the job.
    pub fn from_value(value: &serde_json::Value) -> std::result::Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// Converts one GeoJSON position into a point, taking longitude and latitude
/// from the first two components and tolerating a trailing elevation.
pub fn position_to_point(position: &[f64]) -> Option<GeoPoint> {
    match position {
        [lon, lat, ..] => Some(GeoPoint::new(*lon, *lat)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let raw = br#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Test Point"},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-74.0060, 40.7128]
                    }
                }
            ]
        }
        "#;

        let document = GeoJsonDocument::parse(raw).unwrap();
        assert_eq!(document.feature_count(), 1);

        let feature = Feature::from_value(&document.raw_features()[0]).unwrap();
        assert_eq!(
            feature.geometry,
            Some(Geometry::Point {
                coordinates: vec![-74.0060, 40.7128]
            })
        );
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = GeoJsonDocument::parse(b"{ invalid json }").unwrap_err();
        assert!(matches!(err, Error::MalformedJson(_)));
    }

    #[test]
    fn test_wrong_top_level_type_is_rejected() {
        let raw = br#"{"type": "Feature", "features": []}"#;
        let err = GeoJsonDocument::parse(raw).unwrap_err();
        assert!(matches!(err, Error::InvalidGeoJson(_)));
    }

    #[test]
    fn test_non_array_features_is_rejected() {
        let raw = br#"{"type": "FeatureCollection", "features": {}}"#;
        let err = GeoJsonDocument::parse(raw).unwrap_err();
        assert!(matches!(err, Error::InvalidGeoJson(_)));
    }

    #[test]
    fn test_missing_features_is_rejected() {
        let raw = br#"{"type": "FeatureCollection"}"#;
        assert!(GeoJsonDocument::parse(raw).is_err());
    }

    #[test]
    fn test_unknown_geometry_decodes_as_unsupported() {
        let value = serde_json::json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
            },
            "properties": {}
        });
        let feature = Feature::from_value(&value).unwrap();
        assert_eq!(feature.geometry, Some(Geometry::Unsupported));
    }

    #[test]
    fn test_position_tolerates_elevation() {
        assert_eq!(
            position_to_point(&[-122.0, 37.0, 12.5]),
            Some(GeoPoint::new(-122.0, 37.0))
        );
        assert_eq!(position_to_point(&[-122.0]), None);
        assert_eq!(position_to_point(&[]), None);
    }
}
