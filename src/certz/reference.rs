//! Reference derivation: the token that ties a roster record to its certificate.
//!
//! Candidates are tried in order (`Reference Number`, then `Reference No`). The
//! first one holding a non-empty value wins. A trailing `.0` is stripped from the
//! value, whether it came from a float cell or from text that was once a float.

use crate::error::{CertzError, Result};
use crate::model::{strip_float_suffix, Column, Record};
use std::fmt;
use tracing::debug;

/// Source columns that may carry the reference, highest priority first.
pub fn reference_candidates() -> [Column; 2] {
    [Column::ReferenceNumber, Column::ReferenceNo]
}

/// A non-empty reference token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl Reference {
    /// Trims and strips the float suffix. `None` when nothing is left.
    pub fn new(value: &str) -> Option<Self> {
        let cleaned = strip_float_suffix(value.trim()).trim();
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The record's reference, or `None` when no candidate carries a value.
pub fn derive_reference(record: &Record) -> Option<Reference> {
    reference_candidates().iter().find_map(|column| {
        let value = record.get(column).filter(|v| !v.is_absent())?;
        let reference = Reference::new(&value.raw())?;
        debug!(
            "Found reference number '{}' in column '{}'",
            reference, column
        );
        Some(reference)
    })
}

/// Like [`derive_reference`], but a missing reference is a `MissingReference` error.
pub fn require_reference(record: &Record) -> Result<Reference> {
    derive_reference(record).ok_or_else(|| CertzError::MissingReference {
        identifier: record.student_id(),
    })
}
