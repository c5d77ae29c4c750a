//! Typed observability events
//!
//! The pipeline reports what happened through an injected [`EventSink`]
//! instead of ambient logging calls inside business logic. [`LogSink`]
//! adapts the events onto the `log` facade for callers that just want
//! regular log output.

use crate::core::geo::GeoPoint;
use crate::import::job::ImportStatus;

/// Why a feature contributed no points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The feature's terrain class is in the exclusion set
    ExcludedTerrain,
    /// Geometry type the importer does not handle, or no geometry at all
    UnsupportedGeometry,
    /// The feature value failed to decode
    MalformedFeature,
    /// No coordinate of the feature fell inside the region bounds
    OutOfRegion,
}

/// Discrete events emitted while an import runs
#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    /// The job's status changed; every transition of the state machine
    /// emits exactly one of these
    JobStateChanged {
        job: String,
        from: ImportStatus,
        to: ImportStatus,
    },
    /// A feature was dropped without producing points
    FeatureSkipped { index: usize, reason: SkipReason },
    /// A location was created for this point
    PointCreated { point: GeoPoint },
    /// The store already held an exactly coincident point
    PointDeduped { point: GeoPoint },
}

/// Structured event sink injected into the pipeline
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &ImportEvent);
}

/// Sink that forwards events to the `log` crate facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &ImportEvent) {
        match event {
            ImportEvent::JobStateChanged { job, from, to } => {
                log::info!("job {job}: {from:?} -> {to:?}");
            }
            ImportEvent::FeatureSkipped { index, reason } => {
                log::debug!("feature {index} skipped: {reason:?}");
            }
            ImportEvent::PointCreated { point } => {
                log::debug!("created location at {point}");
            }
            ImportEvent::PointDeduped { point } => {
                log::debug!("skipped duplicate location at {point}");
            }
        }
    }
}

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &ImportEvent) {}
}
