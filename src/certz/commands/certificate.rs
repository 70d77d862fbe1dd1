use crate::archive::{self, CertificateArchive};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CertzError, Result};
use crate::index::RecordIndex;
use crate::reference::require_reference;
use crate::resolver::{certificate_for, resolve_certificate, Certificate};
use crate::source::TableSource;
use std::path::Path;

/// Looks up `identifier` and resolves its certificate from the archive at `archive_path`.
pub fn run<S: TableSource>(
    index: &RecordIndex<S>,
    archive_path: Option<&Path>,
    identifier: &str,
    prefix: &str,
) -> Result<CmdResult> {
    let record = index.lookup(identifier)?;
    // A record without a reference never needs the archive
    let reference = require_reference(&record)?;
    let path = archive_path.ok_or_else(|| {
        CertzError::ArchiveUnavailable("No certificate archive configured".to_string())
    })?;

    let certificate = archive::with_archive(path, |archive| {
        certificate_for(archive, &record, &reference, prefix)
    })?;
    finish(certificate)
}

/// Same as [`run`] against an archive the caller already holds.
pub fn run_with<S, A>(
    index: &RecordIndex<S>,
    archive: &mut A,
    identifier: &str,
    prefix: &str,
) -> Result<CmdResult>
where
    S: TableSource,
    A: CertificateArchive + ?Sized,
{
    let record = index.lookup(identifier)?;
    finish(resolve_certificate(archive, &record, prefix)?)
}

fn finish(certificate: Certificate) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Matched archive entry {}",
        certificate.entry_name
    )));
    Ok(result.with_certificate(certificate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::memory::MemoryArchive;
    use crate::loader::DatasetLoader;
    use crate::model::Scalar;
    use crate::source::memory::fixtures::roster;
    use crate::source::memory::MemorySource;
    use crate::test_utils::write_zip;

    fn index() -> RecordIndex<MemorySource> {
        let grid = roster(&[
            ("A1", "Jane Doe", Scalar::from("42.0")),
            ("B2", "John Roe", Scalar::Empty),
            ("C3", "Amy Poe", Scalar::Float(999.0)),
        ]);
        RecordIndex::open(MemorySource::new(grid), DatasetLoader::default())
    }

    #[test]
    fn test_certificate_from_zip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certs.zip");
        write_zip(
            &path,
            &[("OJT_42_Jane.png".to_string(), b"\x89PNG".to_vec())],
        )
        .unwrap();

        let result = run(&index(), Some(path.as_path()), "A1", "OJT_Certificate").unwrap();
        let cert = result.certificate.unwrap();
        assert_eq!(cert.bytes, b"\x89PNG");
        assert_eq!(cert.mimetype, "image/png");
        assert!(cert.filename.contains("Jane_Doe"));
        assert!(cert.filename.contains("42"));
    }

    #[test]
    fn test_certificate_without_archive() {
        let err = run(&index(), None, "A1", "P").unwrap_err();
        assert!(matches!(err, CertzError::ArchiveUnavailable(_)));
    }

    #[test]
    fn test_missing_reference_precedes_archive() {
        let err = run(&index(), None, "B2", "P").unwrap_err();
        assert!(matches!(err, CertzError::MissingReference { identifier: Some(ref id) } if id == "B2"));

        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("certs.zip");
        let err = run(&index(), Some(absent.as_path()), "B2", "P").unwrap_err();
        assert!(matches!(err, CertzError::MissingReference { .. }));
    }

    #[test]
    fn test_lookup_failure_precedes_archive() {
        let err = run(&index(), None, "Z9", "P").unwrap_err();
        assert!(matches!(err, CertzError::NotFound(_)));
    }

    #[test]
    fn test_outcomes_stay_distinct() {
        let mut archive = MemoryArchive::new().with_entry("OJT_42_Jane.png", b"x");

        let missing = run_with(&index(), &mut archive, "B2", "P").unwrap_err();
        assert!(matches!(missing, CertzError::MissingReference { identifier: Some(ref id) } if id == "B2"));

        let unmatched = run_with(&index(), &mut archive, "C3", "P").unwrap_err();
        assert!(matches!(unmatched, CertzError::CertificateNotFound(r) if r == "999"));

        let result = run_with(&index(), &mut archive, "A1", "P").unwrap();
        assert_eq!(result.certificate.unwrap().filename, "P_Jane_Doe_42.png");
    }
}
