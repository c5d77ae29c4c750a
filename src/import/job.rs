//! Import job orchestration
//!
//! An [`ImportJob`] owns one document's raw bytes and drives the whole
//! pipeline over it: parse, filter, densify, deduplicate-insert. It also
//! owns the status state machine; every transition is written by the run
//! method and nothing else.
//!
//! States: `Pending -> Processing -> {Completed | Failed}`, plus
//! `Processing -> Interrupted` when the caller's cancellation token is
//! observed. `Completed`, `Interrupted` and `Failed` are terminal; a job is
//! never resumed, resubmission is a new job.

use crate::core::config::ImportConfig;
use crate::core::geo::GeoPoint;
use crate::data::geojson::{position_to_point, Feature, GeoJsonDocument, Geometry};
use crate::events::{EventSink, ImportEvent, SkipReason};
use crate::import::cancel::CancelToken;
use crate::import::validate::validate_submission;
use crate::spatial::{filter::RegionFilter, interpolate::GeodesicInterpolator};
use crate::store::{InsertOutcome, LocationStore, StoreError};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states of an import job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Pending,
    Processing,
    Completed,
    Interrupted,
    Failed,
}

/// Aggregate counters reported when a run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub status: ImportStatus,
    /// Features in the document, the progress denominator
    pub features_total: usize,
    /// Features iterated before the run ended, skipped ones included
    pub features_processed: usize,
    /// Features dropped without producing any point
    pub features_skipped: usize,
    pub points_created: usize,
    pub points_deduped: usize,
}

impl ImportSummary {
    fn new(features_total: usize) -> Self {
        Self {
            status: ImportStatus::Processing,
            features_total,
            features_processed: 0,
            features_skipped: 0,
            points_created: 0,
            points_deduped: 0,
        }
    }
}

/// One submitted import: a named document plus its processing state
#[derive(Debug, Clone)]
pub struct ImportJob {
    name: String,
    display_name: String,
    status: ImportStatus,
    file: Vec<u8>,
    created_at: DateTime<Utc>,
    config: ImportConfig,
}

impl ImportJob {
    /// Creates a job in `Pending` from a submission.
    ///
    /// The display name is validated here, before any document bytes are
    /// read; a blank one surfaces as [`Error::Validation`]. The job name is
    /// auto-generated as `import_<unix-timestamp>`.
    pub fn new(display_name: impl Into<String>, file: Vec<u8>) -> Result<Self> {
        let display_name = display_name.into();
        validate_submission(&display_name).map_err(Error::Validation)?;

        Ok(Self {
            name: format!("import_{}", Utc::now().timestamp()),
            display_name,
            status: ImportStatus::Pending,
            file,
            created_at: Utc::now(),
            config: ImportConfig::default(),
        })
    }

    /// Overrides the auto-generated job name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the default pipeline configuration
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn status(&self) -> ImportStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Runs the import to a terminal state.
    ///
    /// `on_progress` is called synchronously with a 0-100 percentage before
    /// each feature is processed (the first call reports 0). The
    /// cancellation token is polled once per feature, right after the
    /// progress callback; when set, the job lands in `Interrupted` and the
    /// summary is returned normally. Parse and store failures land in
    /// `Failed` and the error is returned after the status is recorded.
    pub async fn run<F>(
        &mut self,
        store: &dyn LocationStore,
        sink: &dyn EventSink,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<ImportSummary>
    where
        F: FnMut(u8),
    {
        let filter = RegionFilter::new(
            self.config.bounds,
            self.config.excluded_terrain_classes.iter().cloned(),
        );
        let interpolator = GeodesicInterpolator::new(&self.config.interpolation);

        self.transition(ImportStatus::Processing, sink);

        let document = match GeoJsonDocument::parse(&self.file) {
            Ok(document) => document,
            Err(err) => {
                self.transition(ImportStatus::Failed, sink);
                return Err(err);
            }
        };

        let total = document.feature_count();
        let mut summary = ImportSummary::new(total);

        for (index, raw) in document.raw_features().iter().enumerate() {
            on_progress((index as f64 / total as f64 * 100.0).round() as u8);

            if cancel.is_cancelled() {
                self.transition(ImportStatus::Interrupted, sink);
                summary.status = ImportStatus::Interrupted;
                return Ok(summary);
            }

            let outcome = self
                .process_feature(index, raw, &filter, &interpolator, store, sink, &mut summary)
                .await;
            if let Err(err) = outcome {
                self.transition(ImportStatus::Failed, sink);
                return Err(Error::Store(err));
            }
            summary.features_processed += 1;
        }

        self.transition(ImportStatus::Completed, sink);
        summary.status = ImportStatus::Completed;
        Ok(summary)
    }

    /// Handles one feature. Local conditions (malformed feature, excluded
    /// terrain, out-of-region geometry, duplicate point) are absorbed here;
    /// only store failures escape.
    #[allow(clippy::too_many_arguments)]
    async fn process_feature(
        &self,
        index: usize,
        raw: &serde_json::Value,
        filter: &RegionFilter,
        interpolator: &GeodesicInterpolator,
        store: &dyn LocationStore,
        sink: &dyn EventSink,
        summary: &mut ImportSummary,
    ) -> std::result::Result<(), StoreError> {
        let feature = match Feature::from_value(raw) {
            Ok(feature) => feature,
            Err(_) => {
                Self::skip(index, SkipReason::MalformedFeature, sink, summary);
                return Ok(());
            }
        };

        if filter.is_excluded_terrain(feature.properties.as_ref()) {
            Self::skip(index, SkipReason::ExcludedTerrain, sink, summary);
            return Ok(());
        }

        match feature.geometry {
            Some(Geometry::Point { coordinates }) => match position_to_point(&coordinates) {
                Some(point) if filter.in_region(&point) => {
                    self.insert_point(point, store, sink, summary).await?;
                }
                Some(_) => Self::skip(index, SkipReason::OutOfRegion, sink, summary),
                None => Self::skip(index, SkipReason::MalformedFeature, sink, summary),
            },
            Some(Geometry::LineString { coordinates }) => {
                let admitted: Vec<GeoPoint> = coordinates
                    .iter()
                    .filter_map(|position| position_to_point(position))
                    .filter(|point| filter.in_region(point))
                    .collect();

                if admitted.is_empty() {
                    Self::skip(index, SkipReason::OutOfRegion, sink, summary);
                    return Ok(());
                }

                for point in &admitted {
                    self.insert_point(*point, store, sink, summary).await?;
                }

                // Densify only between vertices that both passed the region
                // filter; a rejected vertex breaks the chain at that edge.
                for pair in admitted.windows(2) {
                    for point in interpolator.interpolate(&pair[0], &pair[1]) {
                        self.insert_point(point, store, sink, summary).await?;
                    }
                }
            }
            Some(Geometry::Unsupported) | None => {
                Self::skip(index, SkipReason::UnsupportedGeometry, sink, summary);
            }
        }

        Ok(())
    }

    /// Exactly-once insertion; a coincident point is a silent skip, never a
    /// job failure
    async fn insert_point(
        &self,
        point: GeoPoint,
        store: &dyn LocationStore,
        sink: &dyn EventSink,
        summary: &mut ImportSummary,
    ) -> std::result::Result<(), StoreError> {
        match store.create_if_absent(point, &self.config.source).await? {
            InsertOutcome::Created => {
                summary.points_created += 1;
                sink.emit(&ImportEvent::PointCreated { point });
            }
            InsertOutcome::AlreadyExists => {
                summary.points_deduped += 1;
                sink.emit(&ImportEvent::PointDeduped { point });
            }
        }
        Ok(())
    }

    fn skip(index: usize, reason: SkipReason, sink: &dyn EventSink, summary: &mut ImportSummary) {
        summary.features_skipped += 1;
        sink.emit(&ImportEvent::FeatureSkipped { index, reason });
    }

    fn transition(&mut self, to: ImportStatus, sink: &dyn EventSink) {
        let from = self.status;
        self.status = to;
        sink.emit(&ImportEvent::JobStateChanged {
            job: self.name.clone(),
            from,
            to,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_pending() {
        let job = ImportJob::new("My Import", Vec::new()).unwrap();
        assert_eq!(job.status(), ImportStatus::Pending);
        assert_eq!(job.display_name(), "My Import");
    }

    #[test]
    fn test_name_is_auto_generated() {
        let job = ImportJob::new("My Import", Vec::new()).unwrap();
        assert!(job.name().starts_with("import_"));
        assert!(job.name()["import_".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_explicit_name_overrides_generated_one() {
        let job = ImportJob::new("My Import", Vec::new())
            .unwrap()
            .with_name("nightly_sync");
        assert_eq!(job.name(), "nightly_sync");
    }

    #[test]
    fn test_blank_display_name_is_rejected() {
        let err = ImportJob::new("", Vec::new()).unwrap_err();
        match err {
            Error::Validation(errors) => assert_eq!(errors[0].field, "display_name"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
