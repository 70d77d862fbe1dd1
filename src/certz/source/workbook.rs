use super::{Grid, TableSource};
use crate::error::{CertzError, Result};
use crate::model::Scalar;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::PathBuf;

/// Spreadsheet-backed roster. Reads the named sheet, or the first one.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet: None,
        }
    }

    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }
}

impl TableSource for WorkbookSource {
    fn read_table(&self) -> Result<Grid> {
        if !self.path.exists() {
            return Err(CertzError::Load(format!(
                "Dataset file not found: {}",
                self.path.display()
            )));
        }

        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| CertzError::Load(e.to_string()))?;

        let sheet = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| CertzError::Load("Workbook has no sheets".to_string()))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| CertzError::Load(format!("Sheet '{}': {}", sheet, e)))?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_to_scalar).collect())
            .collect())
    }

    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{} [{}]", self.path.display(), sheet),
            None => self.path.display().to_string(),
        }
    }
}

fn cell_to_scalar(cell: &Data) -> Scalar {
    match cell {
        Data::Empty => Scalar::Empty,
        Data::String(s) => Scalar::Text(s.clone()),
        Data::Float(f) => Scalar::Float(*f),
        Data::Int(i) => Scalar::Int(*i),
        Data::Bool(b) => Scalar::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Scalar::DateTime(naive),
            None => Scalar::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => Scalar::Text(s.clone()),
        Data::DurationIso(s) => Scalar::Text(s.clone()),
        // Cell errors (#N/A, #DIV/0!) carry no value
        Data::Error(_) => Scalar::Empty,
    }
}
