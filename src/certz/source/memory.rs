use super::{Grid, TableSource};
use crate::error::{CertzError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory roster for testing and embedding.
///
/// The grid can be swapped or put into a failing state after the source has been
/// handed to an index, which is how reload behavior is exercised.
#[derive(Debug)]
pub struct MemorySource {
    state: Mutex<std::result::Result<Grid, String>>,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn new(grid: Grid) -> Self {
        Self {
            state: Mutex::new(Ok(grid)),
            reads: AtomicUsize::new(0),
        }
    }

    /// A source that fails every read with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(Err(reason.into())),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn set_grid(&self, grid: Grid) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Ok(grid);
    }

    pub fn set_failing(&self, reason: impl Into<String>) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Err(reason.into());
    }

    /// Number of `read_table` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TableSource for MemorySource {
    fn read_table(&self) -> Result<Grid> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .map_err(CertzError::Load)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---
