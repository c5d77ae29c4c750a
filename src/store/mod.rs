//! Location persistence seam
//!
//! The importer talks to storage through [`LocationStore`]. Coincident
//! points are deduplicated by the store itself, atomically, through its
//! uniqueness guarantee; callers must not probe-then-insert, which is racy
//! when several imports run against the same store.

pub mod memory;

use crate::core::geo::GeoPoint;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted candidate site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub point: GeoPoint,
    /// Provenance tag distinguishing ingestion paths, e.g. "geojson upload"
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(point: GeoPoint, source: impl Into<String>) -> Self {
        Self {
            point,
            source: source.into(),
            created_at: Utc::now(),
        }
    }
}

/// Result of an exactly-once insertion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The point was not present and a location was created
    Created,
    /// An exactly coincident point already exists; nothing was written
    AlreadyExists,
}

/// Storage failures other than coincident-point rejection.
///
/// Duplicate inserts are part of the [`LocationStore`] contract and come
/// back as [`InsertOutcome::AlreadyExists`]; anything surfacing here aborts
/// the running import.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("storage backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// A point store with an atomic uniqueness constraint on the stored
/// coordinate value
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Creates a location for `point` unless an exactly equal point is
    /// already stored. The check-and-insert must be atomic with respect to
    /// concurrent callers.
    async fn create_if_absent(
        &self,
        point: GeoPoint,
        source: &str,
    ) -> Result<InsertOutcome, StoreError>;
}
