//! # Record Index
//!
//! [`RecordIndex`] owns the loaded [`RecordSet`] and answers identifier lookups.
//!
//! ## Sharing and reloads
//!
//! The set sits behind `RwLock<Arc<RecordSet>>`. A lookup clones the `Arc` and scans
//! without holding the lock. A reload reads and builds the new set with no lock
//! held, then swaps the pointer under the write lock, so readers see either the
//! old set or the new one and never a partial one. A failed reload leaves the
//! current set untouched.
//!
//! ## Lookup policy
//!
//! - The query and each record's `Student ID` are trimmed, then compared exactly.
//!   Comparison is case-sensitive.
//! - Records are scanned in source order and the first match wins. Later records
//!   with the same identifier are unreachable.
//! - An empty or whitespace-only query is rejected with `InvalidQuery` before any
//!   scanning.
//! - When the set is empty, the index tries one reload before answering
//!   `NotFound`. Never more than one per lookup.

use crate::error::{CertzError, Result};
use crate::loader::DatasetLoader;
use crate::model::{Record, RecordSet};
use crate::source::TableSource;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

pub struct RecordIndex<S: TableSource> {
    source: S,
    loader: DatasetLoader,
    records: RwLock<Arc<RecordSet>>,
}

impl<S: TableSource> RecordIndex<S> {
    /// An index with nothing loaded yet. The first lookup triggers the load.
    pub fn new(source: S, loader: DatasetLoader) -> Self {
        Self {
            source,
            loader,
            records: RwLock::new(Arc::new(RecordSet::default())),
        }
    }

    /// Creates the index and attempts the initial load. A failed load is logged
    /// and leaves the index empty; lookups will retry it.
    pub fn open(source: S, loader: DatasetLoader) -> Self {
        let index = Self::new(source, loader);
        if let Err(e) = index.reload() {
            warn!("Error loading student data: {}", e);
        }
        index
    }

    /// Loads the source again and replaces the current set on success.
    pub fn reload(&self) -> Result<Arc<RecordSet>> {
        let fresh = Arc::new(self.loader.load(&self.source)?);
        let mut current = self.records.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&fresh);
        Ok(fresh)
    }

    /// The current set. Cheap; later reloads do not affect the returned handle.
    pub fn snapshot(&self) -> Arc<RecordSet> {
        Arc::clone(&self.records.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn lookup(&self, identifier: &str) -> Result<Record> {
        let wanted = identifier.trim();
        if wanted.is_empty() {
            return Err(CertzError::InvalidQuery(
                "Please enter a Student ID".to_string(),
            ));
        }

        let mut set = self.snapshot();
        if set.is_empty() {
            match self.reload() {
                Ok(fresh) => set = fresh,
                Err(e) => warn!("Reload of empty dataset failed: {}", e),
            }
        }

        match set.find(wanted) {
            Some(record) => {
                info!("Found student with ID: {}", wanted);
                Ok(record.clone())
            }
            None => {
                warn!("No student found with ID: {}", wanted);
                Err(CertzError::NotFound(wanted.to_string()))
            }
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
