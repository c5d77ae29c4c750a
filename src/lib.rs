//! # sitegrid
//!
//! A GeoJSON import pipeline for candidate geographic sites.
//!
//! The crate ingests `FeatureCollection` documents of `Point` and
//! `LineString` features, densifies line geometry into sample points spaced
//! to a fixed satellite-image footprint, filters out excluded terrain and
//! out-of-region geometry, and deduplicates the result against a location
//! store with an atomic uniqueness guarantee. The whole run is wrapped in an
//! import job that owns a status state machine with progress reporting and
//! cooperative cancellation.

pub mod core;
pub mod data;
pub mod events;
pub mod import;
pub mod spatial;
pub mod store;

// Re-export public API
pub use crate::core::{
    bounds::RegionBounds,
    config::{ImportConfig, InterpolationConfig},
    geo::GeoPoint,
};

pub use data::geojson::{Feature, GeoJsonDocument, Geometry};

pub use spatial::{filter::RegionFilter, interpolate::GeodesicInterpolator};

pub use store::{memory::MemoryLocationStore, InsertOutcome, Location, LocationStore, StoreError};

pub use events::{EventSink, ImportEvent, LogSink, NullSink, SkipReason};

pub use import::{
    cancel::CancelToken,
    job::{ImportJob, ImportStatus, ImportSummary},
    validate::FieldError,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),
}
