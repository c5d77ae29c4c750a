//! In-memory location store
//!
//! Reference implementation of [`LocationStore`] for tests and embedded
//! use. The mutex is held across the probe and the insert, which is what
//! makes the uniqueness check atomic under concurrent importers.

use crate::core::geo::GeoPoint;
use crate::store::{InsertOutcome, Location, LocationStore, StoreError};
use async_trait::async_trait;
use fxhash::FxHashMap;
use std::sync::Mutex;

/// Location store backed by a hash map keyed on the exact coordinate bits
#[derive(Debug, Default)]
pub struct MemoryLocationStore {
    locations: Mutex<FxHashMap<(u64, u64), Location>>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored locations
    pub fn len(&self) -> usize {
        self.locations.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all stored locations, in no particular order
    pub fn locations(&self) -> Vec<Location> {
        self.locations
            .lock()
            .map(|l| l.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Looks up a location by its exact coordinate value
    pub fn get(&self, point: &GeoPoint) -> Option<Location> {
        self.locations
            .lock()
            .ok()
            .and_then(|l| l.get(&point.bit_key()).cloned())
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn create_if_absent(
        &self,
        point: GeoPoint,
        source: &str,
    ) -> Result<InsertOutcome, StoreError> {
        let mut locations = self
            .locations
            .lock()
            .map_err(|_| StoreError::Backend(anyhow::anyhow!("store mutex poisoned")))?;

        match locations.entry(point.bit_key()) {
            std::collections::hash_map::Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(Location::new(point, source));
                Ok(InsertOutcome::Created)
            }
        }
    }
}
