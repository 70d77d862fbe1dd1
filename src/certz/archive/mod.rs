//! # Certificate Archives
//!
//! Certificates live as entries inside a container file. The resolver only needs
//! two things from a container: its entry names in natural order, and the bytes
//! of one entry. That is the [`CertificateArchive`] trait.
//!
//! ## Implementations
//!
//! - [`zipfile::ZipCertificates`]: `.zip` files (the usual case).
//! - [`targz::TarGzCertificates`]: `.tar.gz` / `.tgz` files.
//! - [`memory::MemoryArchive`]: in-memory entries for testing.
//!
//! ## Handle lifetime
//!
//! Handles are opened per resolution and dropped when it returns, on success and
//! error paths alike. [`with_archive`] wraps that pattern.
//!
//! Directory entries are never part of the manifest.

use crate::error::Result;
use std::path::Path;

pub mod memory;
pub mod targz;
pub mod zipfile;

pub trait CertificateArchive {
    /// Entry names in container order, directories excluded.
    fn entry_names(&mut self) -> Result<Vec<String>>;

    /// Raw bytes of one entry.
    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>>;

    fn describe(&self) -> String;
}

/// Opens the container at `path`, picking the format from its extension.
/// Anything that is not a tarball is treated as a zip file.
pub fn open(path: &Path) -> Result<Box<dyn CertificateArchive>> {
    if is_tarball(path) {
        Ok(Box::new(targz::TarGzCertificates::open(path)?))
    } else {
        Ok(Box::new(zipfile::ZipCertificates::open(path)?))
    }
}

/// Opens the archive, runs `f` against it and closes it again.
pub fn with_archive<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut dyn CertificateArchive) -> Result<T>,
{
    let mut archive = open(path)?;
    f(archive.as_mut())
}

fn is_tarball(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CertzError;
    use crate::test_utils::{write_tar_gz, write_zip};

    fn entries() -> Vec<(String, Vec<u8>)> {
        vec![
            ("certs/".to_string(), Vec::new()),
            ("certs/cert_328_john.png".to_string(), b"john".to_vec()),
            ("certs/cert_55_amy.pdf".to_string(), b"amy".to_vec()),
        ]
    }

    #[test]
    fn test_tarball_detection() {
        assert!(is_tarball(Path::new("certs.tar.gz")));
        assert!(is_tarball(Path::new("CERTS.TGZ")));
        assert!(!is_tarball(Path::new("certs.zip")));
        assert!(!is_tarball(Path::new("certs")));
    }

    #[test]
    fn test_zip_and_tarball_agree() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("certs.zip");
        let tar_path = dir.path().join("certs.tar.gz");
        write_zip(&zip_path, &entries()).unwrap();
        write_tar_gz(&tar_path, &entries()).unwrap();

        for path in [&zip_path, &tar_path] {
            let names = with_archive(path, |archive| archive.entry_names()).unwrap();
            assert_eq!(
                names,
                vec!["certs/cert_328_john.png", "certs/cert_55_amy.pdf"],
                "manifest of {}",
                path.display()
            );
            let bytes =
                with_archive(path, |archive| archive.read_entry("certs/cert_55_amy.pdf")).unwrap();
            assert_eq!(bytes, b"amy");
        }
    }

    #[test]
    fn test_missing_archive_is_unavailable() {
        for name in ["gone.zip", "gone.tar.gz"] {
            let path = Path::new("/nonexistent").join(name);
            assert!(matches!(
                open(&path).err(),
                Some(CertzError::ArchiveUnavailable(_))
            ));
        }
    }

    #[test]
    fn test_corrupt_archive_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["broken.zip", "broken.tgz"] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"this is not an archive").unwrap();
            assert!(matches!(
                open(&path).err(),
                Some(CertzError::ArchiveUnavailable(_))
            ));
        }
    }

    #[test]
    fn test_overstated_entry_size_is_an_error() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lying.tar.gz");
        let enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        let mut tar = tar::Builder::new(enc);
        let mut header = tar::Header::new_gnu();
        header.set_path("cert_42.png").unwrap();
        header.set_size(1 << 40);
        header.set_mode(0o644);
        header.set_cksum();
        tar.append(&header, &b"short"[..]).unwrap();
        tar.into_inner().unwrap().finish().unwrap();

        let result = with_archive(&path, |archive| archive.read_entry("cert_42.png"));
        assert!(matches!(
            result,
            Err(CertzError::ArchiveUnavailable(_)) | Err(CertzError::ResolutionIo(_))
        ));
    }

    #[test]
    fn test_reading_unknown_entry_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certs.zip");
        write_zip(&path, &entries()).unwrap();

        let err = with_archive(&path, |archive| archive.read_entry("nope.png")).unwrap_err();
        assert!(matches!(err, CertzError::ResolutionIo(_)));
    }
}
