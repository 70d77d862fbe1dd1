use crate::commands::{CmdMessage, CmdResult, DatasetStatus};
use crate::error::Result;
use crate::index::RecordIndex;
use crate::model::Column;
use crate::source::TableSource;
use std::path::Path;

/// Reports on the loaded dataset. An empty index gets one reload attempt first,
/// the same as a lookup would.
pub fn run<S: TableSource>(index: &RecordIndex<S>, archive_path: Option<&Path>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let mut set = index.snapshot();
    if set.is_empty() {
        match index.reload() {
            Ok(fresh) => set = fresh,
            Err(e) => result.add_message(CmdMessage::warning(e.to_string())),
        }
    }

    let sample_identifier = set.records().first().and_then(|r| r.student_id());
    if !set.is_empty() && sample_identifier.is_none() {
        result.add_message(CmdMessage::warning(
            "First record has no Student ID; check the header offset.",
        ));
    }

    let status = DatasetStatus {
        source: index.source().describe(),
        records: set.len(),
        columns: set.columns().iter().map(Column::to_string).collect(),
        loaded_at: set.loaded_at(),
        sample_identifier,
        archive: archive_path.map(|p| p.display().to_string()),
    };
    Ok(result.with_status(status))
}
