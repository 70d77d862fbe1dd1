//! # Tabular Sources
//!
//! The roster reaches the loader through the [`TableSource`] trait, which hands
//! back the raw cell grid (title rows and header row included). Keeping the
//! spreadsheet reader behind a trait lets the loader and index be tested against
//! [`memory::MemorySource`] without any files.
//!
//! ## Implementations
//!
//! - [`workbook::WorkbookSource`]: `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods`
//!   files, read through `calamine`.
//! - [`memory::MemorySource`]: an in-memory grid for tests and embedding.

use crate::error::Result;
use crate::model::Scalar;

pub mod memory;
pub mod workbook;

/// A raw, row-major grid of cells.
pub type Grid = Vec<Vec<Scalar>>;

/// Abstract interface for roster sources.
pub trait TableSource {
    /// Read the full grid. Fails with `CertzError::Load` when the source is
    /// missing or cannot be parsed.
    fn read_table(&self) -> Result<Grid>;

    /// Human readable description (usually a path) for logs and status output.
    fn describe(&self) -> String;
}
