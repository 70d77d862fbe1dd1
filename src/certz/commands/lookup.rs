use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RecordIndex;
use crate::reference::derive_reference;
use crate::source::TableSource;

pub fn run<S: TableSource>(index: &RecordIndex<S>, identifier: &str) -> Result<CmdResult> {
    let record = index.lookup(identifier)?;

    let mut result = CmdResult::default();
    if derive_reference(&record).is_none() {
        result.add_message(CmdMessage::warning(
            "This record has no reference number; its certificate cannot be downloaded.",
        ));
    }
    Ok(result.with_records(vec![record]))
}
