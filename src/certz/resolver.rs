//! # Archive Resolver
//!
//! Finds the certificate for a reference inside an archive.
//!
//! ## Matching
//!
//! An entry matches when the reference occurs anywhere in its name as a
//! contiguous substring. No case folding, no separator or whitespace cleanup.
//! Entries are scanned in container order and the first match wins; archive
//! authors are expected to use the reference as a unique token in file names.
//!
//! ## Outcomes
//!
//! | Situation                              | Result                        |
//! |----------------------------------------|-------------------------------|
//! | archive missing, corrupt or empty      | `ArchiveUnavailable`          |
//! | entries exist, none contains reference | `CertificateNotFound(ref)`    |
//! | match found but extraction fails       | `ResolutionIo`                |
//! | match found                            | entry bytes                   |
//!
//! [`resolve_certificate`] derives the record's reference first and fails with
//! `MissingReference` before the archive is touched. Callers that open the
//! archive themselves derive the reference up front and use [`certificate_for`].

use crate::archive::CertificateArchive;
use crate::error::{CertzError, Result};
use crate::model::Record;
use crate::reference::{require_reference, Reference};
use std::path::Path;
use tracing::{debug, error, info};

pub const DEFAULT_DOWNLOAD_PREFIX: &str = "OJT_Certificate";

/// Extension assumed for entries that have none.
const DEFAULT_EXTENSION: &str = ".png";

const OCTET_STREAM: &str = "application/octet-stream";

/// The matched archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A certificate ready to hand to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub entry_name: String,
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mimetype: &'static str,
}

/// First manifest entry containing the reference.
pub fn find_entry<'a>(manifest: &'a [String], reference: &Reference) -> Option<&'a str> {
    manifest
        .iter()
        .map(String::as_str)
        .find(|name| name.contains(reference.as_str()))
}

pub fn resolve<A>(archive: &mut A, reference: &Reference) -> Result<ResolvedEntry>
where
    A: CertificateArchive + ?Sized,
{
    let manifest = archive.entry_names()?;
    debug!("Found {} files in archive", manifest.len());

    if manifest.is_empty() {
        error!("Archive {} has no entries", archive.describe());
        return Err(CertzError::ArchiveUnavailable(format!(
            "{} contains no certificates",
            archive.describe()
        )));
    }

    let name = match find_entry(&manifest, reference) {
        Some(name) => name.to_string(),
        None => {
            error!("No certificate found for reference number: {}", reference);
            return Err(CertzError::CertificateNotFound(reference.to_string()));
        }
    };
    info!("Found matching certificate: {}", name);

    let bytes = archive.read_entry(&name)?;
    Ok(ResolvedEntry { name, bytes })
}

/// Derives the record's reference, resolves it and packages the result.
pub fn resolve_certificate<A>(archive: &mut A, record: &Record, prefix: &str) -> Result<Certificate>
where
    A: CertificateArchive + ?Sized,
{
    let reference = require_reference(record)?;
    certificate_for(archive, record, &reference, prefix)
}

/// Resolves an already derived reference and names the download after `record`.
pub fn certificate_for<A>(
    archive: &mut A,
    record: &Record,
    reference: &Reference,
    prefix: &str,
) -> Result<Certificate>
where
    A: CertificateArchive + ?Sized,
{
    let entry = resolve(archive, reference)?;

    let extension = extension_of(&entry.name);
    let filename = download_name(prefix, record.name().as_deref(), reference, &extension);
    info!("Sending certificate file for reference: {}", reference);

    Ok(Certificate {
        entry_name: entry.name,
        bytes: entry.bytes,
        filename,
        mimetype: mimetype_for(&extension),
    })
}

/// Lowercased extension with its dot, or `.png` when the entry has none.
pub fn extension_of(entry_name: &str) -> String {
    Path::new(entry_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

pub fn mimetype_for(extension: &str) -> &'static str {
    match extension {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        ".pdf" => "application/pdf",
        _ => OCTET_STREAM,
    }
}

/// `{prefix}_{name}_{reference}{ext}`, or `{prefix}_{reference}{ext}` without a name.
pub fn download_name(
    prefix: &str,
    name: Option<&str>,
    reference: &Reference,
    extension: &str,
) -> String {
    let reference = sanitize_filename(reference.as_str());
    match name.map(sanitize_filename).filter(|n| !n.is_empty()) {
        Some(name) => format!("{}_{}_{}{}", prefix, name, reference, extension),
        None => format!("{}_{}{}", prefix, reference, extension),
    }
}

fn sanitize_filename(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::memory::MemoryArchive;
    use crate::model::{Column, Scalar};

    fn reference(value: &str) -> Reference {
        Reference::new(value).unwrap()
    }

    fn two_certs() -> MemoryArchive {
        MemoryArchive::new()
            .with_entry("cert_328_john.png", b"john")
            .with_entry("cert_55_amy.png", b"amy")
    }

    #[test]
    fn test_resolve_first_match() {
        let entry = resolve(&mut two_certs(), &reference("328")).unwrap();
        assert_eq!(entry.name, "cert_328_john.png");
        assert_eq!(entry.bytes, b"john");
    }

    #[test]
    fn test_resolve_tie_goes_to_first_entry() {
        let mut archive = MemoryArchive::new()
            .with_entry("batch1/cert_5_a.png", b"a")
            .with_entry("batch1/cert_55_b.png", b"b");
        let entry = resolve(&mut archive, &reference("5")).unwrap();
        assert_eq!(entry.name, "batch1/cert_5_a.png");
    }

    #[test]
    fn test_resolve_no_match() {
        let err = resolve(&mut two_certs(), &reference("999")).unwrap_err();
        assert!(matches!(err, CertzError::CertificateNotFound(r) if r == "999"));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let mut archive = MemoryArchive::new().with_entry("cert_ab12.png", b"x");
        let err = resolve(&mut archive, &reference("AB12")).unwrap_err();
        assert!(matches!(err, CertzError::CertificateNotFound(_)));
    }

    #[test]
    fn test_resolve_empty_archive() {
        let err = resolve(&mut MemoryArchive::new(), &reference("328")).unwrap_err();
        assert!(matches!(err, CertzError::ArchiveUnavailable(_)));

        let mut only_dirs = MemoryArchive::new().with_entry("certs/", b"");
        let err = resolve(&mut only_dirs, &reference("328")).unwrap_err();
        assert!(matches!(err, CertzError::ArchiveUnavailable(_)));
    }

    #[test]
    fn test_resolve_read_failure() {
        let mut archive = two_certs().with_broken_reads();
        let err = resolve(&mut archive, &reference("55")).unwrap_err();
        assert!(matches!(err, CertzError::ResolutionIo(_)));
    }

    #[test]
    fn test_resolve_certificate_end_to_end() {
        let record = Record::from_pairs([
            ("Student Id", Scalar::from("A1")),
            ("Name of the Student", Scalar::from("Jane Doe")),
            ("Reference No", Scalar::from("42.0")),
        ]);
        let mut archive = MemoryArchive::new().with_entry("OJT_42_Jane.png", b"\x89PNG");

        let cert = resolve_certificate(&mut archive, &record, DEFAULT_DOWNLOAD_PREFIX).unwrap();
        assert_eq!(cert.entry_name, "OJT_42_Jane.png");
        assert_eq!(cert.bytes, b"\x89PNG");
        assert_eq!(cert.mimetype, "image/png");
        assert_eq!(cert.filename, "OJT_Certificate_Jane_Doe_42.png");
    }

    #[test]
    fn test_missing_reference_never_touches_archive() {
        let record = Record::new().with(Column::StudentId, "A1");
        // An empty archive would answer ArchiveUnavailable if it were consulted
        let err = resolve_certificate(&mut MemoryArchive::new(), &record, "X").unwrap_err();
        assert!(matches!(err, CertzError::MissingReference { .. }));
    }

    #[test]
    fn test_certificate_without_name_uses_reference() {
        let record = Record::new().with(Column::ReferenceNumber, Scalar::Float(55.0));
        let cert = resolve_certificate(&mut two_certs(), &record, "Cert").unwrap();
        assert_eq!(cert.filename, "Cert_55.png");
    }

    #[test]
    fn test_extension_and_mimetype() {
        assert_eq!(extension_of("a/b/cert_1.PDF"), ".pdf");
        assert_eq!(extension_of("cert_1"), ".png");
        assert_eq!(extension_of("dir.v2/cert_1"), ".png");
        assert_eq!(mimetype_for(".pdf"), "application/pdf");
        assert_eq!(mimetype_for(".jpeg"), "image/jpeg");
        assert_eq!(mimetype_for(".docx"), "application/octet-stream");
    }

    #[test]
    fn test_download_name_is_filesystem_safe() {
        let name = download_name("P", Some(" Jane / Doe "), &reference("7"), ".png");
        assert_eq!(name, "P_Jane___Doe_7.png");
    }
}
