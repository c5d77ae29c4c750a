//! Footprint-spaced line densification
//!
//! Given two geographic points, computes the interior sample points needed
//! so that consecutive image footprints along the segment overlap by the
//! configured fraction. The point count is distance-driven, not a fixed
//! subdivision.
//!
//! Limitation: segments crossing the antimeridian or adjacent to the poles
//! get no wraparound correction.

use crate::core::{config::InterpolationConfig, geo::GeoPoint};

/// Densifies line segments into evenly spaced sample points
#[derive(Debug, Clone)]
pub struct GeodesicInterpolator {
    spacing_meters: f64,
    meters_per_degree: f64,
}

impl GeodesicInterpolator {
    pub fn new(config: &InterpolationConfig) -> Self {
        Self {
            spacing_meters: config.spacing_meters(),
            meters_per_degree: config.meters_per_degree,
        }
    }

    /// Target real-world spacing between consecutive sample points in meters
    pub fn spacing_meters(&self) -> f64 {
        self.spacing_meters
    }

    /// Computes the ordered interior points between `start` and `end`.
    ///
    /// Returns an empty vec when the endpoints alone already satisfy the
    /// spacing, including the degenerate zero-distance case. Interior points
    /// are placed at equal parametric fractions, interpolating each axis
    /// independently in degree space.
    pub fn interpolate(&self, start: &GeoPoint, end: &GeoPoint) -> Vec<GeoPoint> {
        let distance = self.planar_distance(start, end);

        let additional_points =
            ((distance / self.spacing_meters).ceil() as i64 - 1).max(0) as usize;
        if additional_points == 0 {
            return Vec::new();
        }

        (1..=additional_points)
            .map(|i| {
                let ratio = i as f64 / (additional_points + 1) as f64;
                GeoPoint::new(
                    start.lon + (end.lon - start.lon) * ratio,
                    start.lat + (end.lat - start.lat) * ratio,
                )
            })
            .collect()
    }

    /// Euclidean distance in meters on a local planar approximation.
    ///
    /// Longitude degrees shrink with latitude, so they are scaled by the
    /// cosine of the segment's average latitude before conversion to meters.
    fn planar_distance(&self, start: &GeoPoint, end: &GeoPoint) -> f64 {
        let avg_lat = (start.lat + end.lat) / 2.0;
        let lon_scale = avg_lat.to_radians().cos();

        let start_x = start.lon * self.meters_per_degree * lon_scale;
        let start_y = start.lat * self.meters_per_degree;
        let end_x = end.lon * self.meters_per_degree * lon_scale;
        let end_y = end.lat * self.meters_per_degree;

        let dx = end_x - start_x;
        let dy = end_y - start_y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for GeodesicInterpolator {
    fn default() -> Self {
        Self::new(&InterpolationConfig::default())
    }
}
