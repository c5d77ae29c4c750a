use crate::core::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Represents a rectangular region of geographic coordinates used to admit
/// or reject points before persistence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl RegionBounds {
    /// Creates new bounds from individual coordinates
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Rough bounding box for the contiguous USA
    pub fn contiguous_usa() -> Self {
        Self::new(-124.848974, -66.885444, 24.396308, 49.384358)
    }

    /// Checks if the bounds contain a point; boundary values are inclusive
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lon >= self.min_lon
            && point.lon <= self.max_lon
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::contiguous_usa()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = RegionBounds::new(-75.0, -73.0, 40.0, 41.0);
        assert!(bounds.contains(&GeoPoint::new(-74.0, 40.5)));
        assert!(!bounds.contains(&GeoPoint::new(-74.0, 42.0)));
        assert!(!bounds.contains(&GeoPoint::new(-76.0, 40.5)));
    }

    #[test]
    fn test_boundary_values_are_inclusive() {
        let bounds = RegionBounds::new(-75.0, -73.0, 40.0, 41.0);
        assert!(bounds.contains(&GeoPoint::new(-75.0, 40.0)));
        assert!(bounds.contains(&GeoPoint::new(-73.0, 41.0)));
    }

    #[test]
    fn test_contiguous_usa_bounds() {
        let usa = RegionBounds::contiguous_usa();
        // San Francisco is in, London is out
        assert!(usa.contains(&GeoPoint::new(-122.4194, 37.7749)));
        assert!(!usa.contains(&GeoPoint::new(-0.1276, 51.5074)));
    }
}
