use crate::archive::{self, CertificateArchive};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CertzError, Result};
use std::path::Path;

/// Lists archive entries, optionally narrowed to those containing `filter`.
pub fn run(archive_path: Option<&Path>, filter: Option<&str>, ignore_case: bool) -> Result<CmdResult> {
    let path = archive_path.ok_or_else(|| {
        CertzError::ArchiveUnavailable("No certificate archive configured".to_string())
    })?;
    archive::with_archive(path, |archive| run_with(archive, filter, ignore_case))
}

pub fn run_with<A>(archive: &mut A, filter: Option<&str>, ignore_case: bool) -> Result<CmdResult>
where
    A: CertificateArchive + ?Sized,
{
    let names = archive.entry_names()?;
    let total = names.len();

    let entries: Vec<String> = match filter.filter(|f| !f.is_empty()) {
        Some(term) => names
            .into_iter()
            .filter(|name| matches_term(name, term, ignore_case))
            .collect(),
        None => names,
    };

    let mut result = CmdResult::default();
    if entries.len() == total {
        result.add_message(CmdMessage::info(format!("{} entries in archive", total)));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} of {} entries match",
            entries.len(),
            total
        )));
    }
    Ok(result.with_entries(entries))
}

fn matches_term(name: &str, term: &str, ignore_case: bool) -> bool {
    if ignore_case {
        name.to_lowercase().contains(&term.to_lowercase())
    } else {
        name.contains(term)
    }
}
