//! # Dataset Loader
//!
//! Turns the raw grid of a [`TableSource`] into a [`RecordSet`].
//!
//! Loading is all-or-nothing: either every row becomes a record or the whole load
//! fails with [`CertzError::Load`]. The loader never touches the set a caller
//! already holds, so a failed load leaves the previous dataset in place.
//!
//! Values typed to the right of the header widen the table; their columns are
//! named `Unnamed: <col>` like blank header cells.
//!
//! Some rosters put a title line above the header. `header_offset` is the number
//! of grid rows to skip before the header row; it defaults to 0.

use crate::error::{CertzError, Result};
use crate::model::{normalize_headers, Column, Record, RecordSet, Scalar};
use crate::source::{Grid, TableSource};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetLoader {
    header_offset: usize,
}

impl DatasetLoader {
    pub fn new(header_offset: usize) -> Self {
        Self { header_offset }
    }

    pub fn load<S: TableSource + ?Sized>(&self, source: &S) -> Result<RecordSet> {
        let name = source.describe();
        debug!("Loading dataset from {}", name);

        let grid = source.read_table()?;
        let set = self.build(grid, name)?;

        debug!(
            "Columns in dataset: {:?}",
            set.columns().iter().map(Column::name).collect::<Vec<_>>()
        );
        if let Some(first) = set.records().first() {
            debug!(
                "Sample Student ID: {}",
                first.student_id().as_deref().unwrap_or("Not found")
            );
        }
        info!("Loaded {} student records", set.len());
        Ok(set)
    }

    /// Builds a record set from an already read grid.
    pub fn build(&self, grid: Grid, source_name: impl Into<String>) -> Result<RecordSet> {
        if grid.iter().all(|row| row.iter().all(Scalar::is_absent)) {
            return Err(CertzError::Load("Dataset is empty".to_string()));
        }

        let header_row = grid.get(self.header_offset).ok_or_else(|| {
            CertzError::Load(format!(
                "Header row {} is past the end of the dataset ({} rows)",
                self.header_offset + 1,
                grid.len()
            ))
        })?;

        let header_width = used_width(header_row);
        if header_width == 0 {
            return Err(CertzError::Load("Missing header row".to_string()));
        }
        let width = grid
            .iter()
            .skip(self.header_offset + 1)
            .map(|row| used_width(row))
            .fold(header_width, usize::max);

        let headers: Vec<String> = (0..width)
            .map(|i| header_name(i, header_row.get(i).unwrap_or(&Scalar::Empty)))
            .collect();
        let columns = normalize_headers(&headers);

        let mut records = Vec::new();
        for row in grid.iter().skip(self.header_offset + 1) {
            if row.iter().all(Scalar::is_absent) {
                continue;
            }

            let fields = columns
                .iter()
                .enumerate()
                .map(|(col, column)| (column.clone(), row.get(col).cloned().unwrap_or_default()))
                .collect();
            records.push(Record::from_fields(fields));
        }

        Ok(RecordSet::new(columns, records, source_name))
    }
}

/// Position after the last non-empty cell.
fn used_width(row: &[Scalar]) -> usize {
    row.iter()
        .rposition(|cell| !cell.is_absent())
        .map_or(0, |last| last + 1)
}

fn header_name(position: usize, cell: &Scalar) -> String {
    match cell {
        Scalar::Text(text) if !text.trim().is_empty() => text.clone(),
        other => other
            .render()
            .unwrap_or_else(|| format!("Unnamed: {}", position)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::roster;
    use crate::source::memory::MemorySource;

    fn text_row(cells: &[&str]) -> Vec<Scalar> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    Scalar::Empty
                } else {
                    Scalar::from(*c)
                }
            })
            .collect()
    }

    #[test]
    fn test_load_normalizes_headers() {
        let source = MemorySource::new(roster(&[("A1", "Jane Doe", Scalar::from("42.0"))]));
        let set = DatasetLoader::default().load(&source).unwrap();

        let names: Vec<&str> = set.columns().iter().map(Column::name).collect();
        assert_eq!(names, vec!["Student ID", "Name", "Reference Number"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].student_id().as_deref(), Some("A1"));
        assert_eq!(set.records()[0].name().as_deref(), Some("Jane Doe"));
        assert_eq!(set.source(), "memory");
        assert!(set.loaded_at().is_some());
    }

    #[test]
    fn test_values_keep_their_type() {
        let source = MemorySource::new(roster(&[("A1", "Jane", Scalar::Float(42.0))]));
        let set = DatasetLoader::default().load(&source).unwrap();
        assert_eq!(
            set.records()[0].get(&Column::ReferenceNumber),
            Some(&Scalar::Float(42.0))
        );
    }

    #[test]
    fn test_header_offset_skips_title_line() {
        let mut grid = vec![text_row(&["OJT Schedule Certificate", "", ""])];
        grid.extend(roster(&[("A1", "Jane", Scalar::Int(1))]));

        let set = DatasetLoader::new(1).build(grid.clone(), "t").unwrap();
        assert_eq!(set.columns()[0], Column::StudentId);
        assert_eq!(set.len(), 1);

        // Without the offset the title becomes the header
        let set = DatasetLoader::new(0).build(grid, "t").unwrap();
        assert_eq!(
            set.columns()[0],
            Column::Other("OJT Schedule Certificate".to_string())
        );
    }

    #[test]
    fn test_unmapped_headers_pass_through() {
        let grid = vec![
            text_row(&["Student Id", " Batch  No", "remarks"]),
            text_row(&["A1", "7", "ok"]),
        ];
        let set = DatasetLoader::default().build(grid, "t").unwrap();
        let names: Vec<&str> = set.columns().iter().map(Column::name).collect();
        assert_eq!(names, vec!["Student ID", " Batch  No", "remarks"]);
    }

    #[test]
    fn test_blank_header_cells_are_named_by_position() {
        let grid = vec![text_row(&["Student Id", "", "Name"]), text_row(&["A1", "x", "Jane"])];
        let set = DatasetLoader::default().build(grid, "t").unwrap();
        assert_eq!(set.columns()[1], Column::Other("Unnamed: 1".to_string()));
    }

    #[test]
    fn test_short_rows_are_padded_and_blank_rows_skipped() {
        let grid = vec![
            text_row(&["Student Id", "Name", "Reference No"]),
            text_row(&["A1"]),
            text_row(&["", "", ""]),
            text_row(&["A2", "Amy", "55"]),
        ];
        let set = DatasetLoader::default().build(grid, "t").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].get(&Column::Name), Some(&Scalar::Empty));
        assert_eq!(set.records()[1].student_id().as_deref(), Some("A2"));
    }

    #[test]
    fn test_values_past_header_widen_the_table() {
        let grid = vec![
            text_row(&["Student Id", "Name", "Reference No"]),
            text_row(&["A1", "Jane", "42", "note"]),
            text_row(&["A2", "Amy", "55"]),
        ];
        let set = DatasetLoader::default().build(grid, "t").unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.columns()[3], Column::Other("Unnamed: 3".to_string()));
        assert_eq!(
            set.records()[0].get(&Column::Other("Unnamed: 3".to_string())),
            Some(&Scalar::from("note"))
        );
        assert_eq!(set.find("A2").and_then(|r| r.name()).as_deref(), Some("Amy"));
    }

    #[test]
    fn test_trailing_empty_cells_do_not_widen() {
        let grid = vec![
            text_row(&["Student Id", "Name"]),
            text_row(&["A1", "Jane", "", ""]),
        ];
        let set = DatasetLoader::default().build(grid, "t").unwrap();
        assert_eq!(set.columns().len(), 2);
    }

    #[test]
    fn test_empty_sources_fail() {
        let loader = DatasetLoader::default();
        assert!(matches!(loader.build(vec![], "t"), Err(CertzError::Load(_))));
        assert!(matches!(
            loader.build(vec![text_row(&["", ""])], "t"),
            Err(CertzError::Load(_))
        ));
    }

    #[test]
    fn test_offset_past_end_fails() {
        let grid = roster(&[]);
        let err = DatasetLoader::new(5).build(grid, "t").unwrap_err();
        assert!(matches!(err, CertzError::Load(_)));
    }

    #[test]
    fn test_missing_header_fails() {
        let grid = vec![text_row(&["Title", ""]), text_row(&["", ""]), text_row(&["A1", "x"])];
        let err = DatasetLoader::new(1).build(grid, "t").unwrap_err();
        assert!(matches!(err, CertzError::Load(_)));
    }

    #[test]
    fn test_header_only_gives_empty_set() {
        let set = DatasetLoader::default().build(roster(&[]), "t").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns().len(), 3);
    }

    #[test]
    fn test_source_failure_propagates() {
        let source = MemorySource::failing("unreadable container");
        let err = DatasetLoader::default().load(&source).unwrap_err();
        assert!(matches!(err, CertzError::Load(msg) if msg == "unreadable container"));
    }
}
