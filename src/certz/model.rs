//! # Data Model
//!
//! A roster row becomes a [`Record`]: an ordered list of `(Column, Scalar)` pairs.
//! The columns the resolution pipeline cares about (identifier, name, course and the
//! two reference candidates) are [`Column`] variants; anything else the source
//! carries rides along as [`Column::Other`] in source order.
//!
//! Values keep the source's scalar type. Numbers are rendered to text only on
//! demand, and the trailing `.0` that spreadsheets leave on integer-like numbers is
//! stripped at render time, never at load time.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Header aliases applied at load time. Exact match only.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("Student Id", "Student ID"),
    ("Name of the Student", "Name"),
    ("Programme/College", "Course"),
    ("Reference No", "Reference Number"),
];

const STUDENT_ID: &str = "Student ID";
const NAME: &str = "Name";
const COURSE: &str = "Course";
const REFERENCE_NUMBER: &str = "Reference Number";
const REFERENCE_NO: &str = "Reference No";

/// Applies the alias table to a single header. Unmapped headers pass through untouched.
pub fn normalize_header(header: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == header)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(header)
}

/// Normalizes a full header row.
///
/// When two headers collapse onto the same known column, the first one keeps it.
/// A later reference header becomes the secondary [`Column::ReferenceNo`] candidate;
/// any other late duplicate keeps its raw header as [`Column::Other`].
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());

    for header in headers {
        let raw = header.as_ref();
        let column = match Column::known(normalize_header(raw)) {
            Some(known) if !columns.contains(&known) => known,
            Some(Column::ReferenceNumber) if !columns.contains(&Column::ReferenceNo) => {
                Column::ReferenceNo
            }
            Some(_) => Column::Other(raw.to_string()),
            None => Column::Other(raw.to_string()),
        };
        columns.push(column);
    }

    columns
}

/// Strips one trailing `.0` left behind by float storage of an integer-like value.
pub fn strip_float_suffix(value: &str) -> &str {
    value.strip_suffix(".0").unwrap_or(value)
}

/// A normalized column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    StudentId,
    Name,
    Course,
    ReferenceNumber,
    ReferenceNo,
    Other(String),
}

impl Column {
    /// Maps a canonical column name to a known column.
    pub fn known(name: &str) -> Option<Column> {
        match name {
            STUDENT_ID => Some(Column::StudentId),
            NAME => Some(Column::Name),
            COURSE => Some(Column::Course),
            REFERENCE_NUMBER => Some(Column::ReferenceNumber),
            REFERENCE_NO => Some(Column::ReferenceNo),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Column::StudentId => STUDENT_ID,
            Column::Name => NAME,
            Column::Course => COURSE,
            Column::ReferenceNumber => REFERENCE_NUMBER,
            Column::ReferenceNo => REFERENCE_NO,
            Column::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Column::Other(_))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Scalar {
    /// True for values the source did not really provide: empty cells, NaN and
    /// whitespace-only text.
    pub fn is_absent(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Float(f) => f.is_nan(),
            Scalar::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }

    /// Canonical string form. Integer-valued floats keep their `.0`.
    pub fn raw(&self) -> String {
        match self {
            Scalar::Empty => String::new(),
            Scalar::Text(s) => s.clone(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 => {
                format!("{:.1}", f)
            }
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(true) => "True".to_string(),
            Scalar::Bool(false) => "False".to_string(),
            Scalar::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Display form: trimmed, with the float suffix stripped from numbers.
    /// Absent values render as `None`.
    pub fn render(&self) -> Option<String> {
        if self.is_absent() {
            return None;
        }
        let raw = self.raw();
        let trimmed = raw.trim();
        let rendered = if self.is_numeric() {
            strip_float_suffix(trimmed)
        } else {
            trimmed
        };
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.to_string())
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// One normalized roster row. Immutable once built; callers get clones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(Column, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from already normalized columns.
    pub fn from_fields(fields: Vec<(Column, Scalar)>) -> Self {
        Self { fields }
    }

    /// Builds a record from raw header/value pairs, applying header normalization.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Scalar)>,
    {
        let (headers, values): (Vec<K>, Vec<Scalar>) = pairs.into_iter().unzip();
        let columns = normalize_headers(&headers);
        Self {
            fields: columns.into_iter().zip(values).collect(),
        }
    }

    /// Returns a copy with `column` set to `value`, replacing any previous value.
    pub fn with(mut self, column: Column, value: impl Into<Scalar>) -> Self {
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    pub fn get(&self, column: &Column) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, value)| value)
    }

    fn rendered(&self, column: &Column) -> Option<String> {
        self.get(column).and_then(Scalar::render)
    }

    pub fn student_id(&self) -> Option<String> {
        self.rendered(&Column::StudentId)
    }

    pub fn name(&self) -> Option<String> {
        self.rendered(&Column::Name)
    }

    pub fn course(&self) -> Option<String> {
        self.rendered(&Column::Course)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Column, &Scalar)> {
        self.fields.iter().map(|(c, v)| (c, v))
    }

    /// Columns the pipeline does not interpret, in source order.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields
            .iter()
            .filter(|(c, _)| !c.is_known())
            .map(|(c, v)| (c.name(), v))
    }

    /// Field name and display value for every field that is present.
    pub fn display_fields(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(c, v)| v.render().map(|r| (c.name().to_string(), r)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

/// The records produced by one successful load, in source row order.
///
/// Duplicate identifiers are kept. Lookups take the first occurrence, so later
/// duplicates are unreachable through [`RecordSet::find`].
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    columns: Vec<Column>,
    records: Vec<Record>,
    source: String,
    loaded_at: Option<DateTime<Utc>>,
}

impl RecordSet {
    pub fn new(columns: Vec<Column>, records: Vec<Record>, source: impl Into<String>) -> Self {
        Self {
            columns,
            records,
            source: source.into(),
            loaded_at: Some(Utc::now()),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// `None` for the placeholder set that exists before any load succeeded.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose trimmed identifier equals the trimmed query. Case-sensitive.
    pub fn find(&self, identifier: &str) -> Option<&Record> {
        let wanted = identifier.trim();
        self.records
            .iter()
            .find(|record| record.student_id().as_deref() == Some(wanted))
    }
}
