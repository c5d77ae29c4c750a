//! Configuration for the import pipeline
//!
//! All geographic and interpolation constants are supplied as static
//! configuration rather than derived from the imported document.

use crate::core::bounds::RegionBounds;

/// Provenance tag recorded on every location created by the GeoJSON importer
pub const GEOJSON_SOURCE: &str = "geojson upload";

/// Terrain class property consulted on each feature
pub const GEO_CLASS_PROPERTY: &str = "GEO_CLASS";

/// Parameters deriving the real-world spacing between consecutive sample
/// points along a densified line.
///
/// Downstream capture uses fixed-size square image footprints at a fixed
/// zoom level; consecutive points must be spaced so their footprints overlap
/// by the target fraction, guaranteeing continuous coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationConfig {
    /// Side of the square image footprint in pixels
    pub footprint_size_px: f64,
    /// Ground resolution at the capture zoom level
    pub meters_per_pixel: f64,
    /// Fraction of footprint overlap between consecutive images
    pub overlap_fraction: f64,
    /// Meters per degree of latitude at the equator
    pub meters_per_degree: f64,
}

impl InterpolationConfig {
    /// Target spacing between consecutive sample points in meters.
    ///
    /// With the defaults (224 px, 2.4 m/px, 10% overlap) this is 483.84 m.
    pub fn spacing_meters(&self) -> f64 {
        self.footprint_size_px * self.meters_per_pixel * (1.0 - self.overlap_fraction)
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            footprint_size_px: 224.0,
            meters_per_pixel: 2.4,
            overlap_fraction: 0.10,
            meters_per_degree: 111_319.9,
        }
    }
}

/// Static configuration for one import pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Region admitting points before persistence
    pub bounds: RegionBounds,
    /// Terrain class codes whose features are dropped entirely.
    /// Defaults to open water ("O") and the Great Lakes ("G").
    pub excluded_terrain_classes: Vec<String>,
    /// Line densification parameters
    pub interpolation: InterpolationConfig,
    /// Provenance tag written on every created location
    pub source: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            bounds: RegionBounds::default(),
            excluded_terrain_classes: vec!["O".to_string(), "G".to_string()],
            interpolation: InterpolationConfig::default(),
            source: GEOJSON_SOURCE.to_string(),
        }
    }
}

impl ImportConfig {
    /// Replaces the region bounding box
    pub fn with_bounds(mut self, bounds: RegionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replaces the excluded terrain class codes
    pub fn with_excluded_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_terrain_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the interpolation parameters
    pub fn with_interpolation(mut self, interpolation: InterpolationConfig) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Replaces the provenance source tag
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing() {
        let config = InterpolationConfig::default();
        assert!((config.spacing_meters() - 483.84).abs() < 1e-9);
    }

    #[test]
    fn test_default_config() {
        let config = ImportConfig::default();
        assert_eq!(config.excluded_terrain_classes, vec!["O", "G"]);
        assert_eq!(config.source, GEOJSON_SOURCE);
        assert_eq!(config.bounds, RegionBounds::contiguous_usa());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ImportConfig::default()
            .with_excluded_classes(["W"])
            .with_source("manual paste");
        assert_eq!(config.excluded_terrain_classes, vec!["W"]);
        assert_eq!(config.source, "manual paste");
    }
}
