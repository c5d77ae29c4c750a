//! Geographic admission filtering
//!
//! Two independent checks: a feature-level terrain-class exclusion (applied
//! first, it drops the whole feature) and a per-coordinate region membership
//! test against the configured bounding box.

use crate::core::{bounds::RegionBounds, config::GEO_CLASS_PROPERTY, geo::GeoPoint};
use fxhash::FxHashSet;
use std::collections::HashMap;

/// Pure predicate deciding which coordinates and features participate in an
/// import
#[derive(Debug, Clone)]
pub struct RegionFilter {
    bounds: RegionBounds,
    excluded_classes: FxHashSet<String>,
}

impl RegionFilter {
    pub fn new<I, S>(bounds: RegionBounds, excluded_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bounds,
            excluded_classes: excluded_classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Closed-interval membership test against the region bounds
    pub fn in_region(&self, point: &GeoPoint) -> bool {
        self.bounds.contains(point)
    }

    /// Returns true when the feature's terrain class marks it as excluded.
    /// An excluded feature produces no points regardless of geometry type.
    pub fn is_excluded_terrain(
        &self,
        properties: Option<&HashMap<String, serde_json::Value>>,
    ) -> bool {
        properties
            .and_then(|props| props.get(GEO_CLASS_PROPERTY))
            .and_then(serde_json::Value::as_str)
            .is_some_and(|class| self.excluded_classes.contains(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn usa_water_filter() -> RegionFilter {
        RegionFilter::new(RegionBounds::contiguous_usa(), ["O", "G"])
    }

    fn props(class: &str) -> HashMap<String, serde_json::Value> {
        HashMap::from([(GEO_CLASS_PROPERTY.to_string(), json!(class))])
    }

    #[test]
    fn test_in_region() {
        let filter = usa_water_filter();
        assert!(filter.in_region(&GeoPoint::new(-122.4194, 37.7749)));
        assert!(!filter.in_region(&GeoPoint::new(2.3522, 48.8566)));
    }

    #[test]
    fn test_region_boundary_is_inclusive() {
        let filter = usa_water_filter();
        assert!(filter.in_region(&GeoPoint::new(-124.848974, 24.396308)));
        assert!(filter.in_region(&GeoPoint::new(-66.885444, 49.384358)));
    }

    #[test]
    fn test_excluded_terrain_classes() {
        let filter = usa_water_filter();
        assert!(filter.is_excluded_terrain(Some(&props("O"))));
        assert!(filter.is_excluded_terrain(Some(&props("G"))));
        assert!(!filter.is_excluded_terrain(Some(&props("U"))));
    }

    #[test]
    fn test_missing_properties_are_not_excluded() {
        let filter = usa_water_filter();
        assert!(!filter.is_excluded_terrain(None));
        assert!(!filter.is_excluded_terrain(Some(&HashMap::new())));
    }

    #[test]
    fn test_non_string_geo_class_is_not_excluded() {
        let filter = usa_water_filter();
        let props = HashMap::from([(GEO_CLASS_PROPERTY.to_string(), json!(7))]);
        assert!(!filter.is_excluded_terrain(Some(&props)));
    }
}
