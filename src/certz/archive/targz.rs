use super::CertificateArchive;
use crate::error::{CertzError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Gzipped tarball of certificates.
///
/// Tar has no central directory, so the entry list is built by one pass over the
/// stream at open time and each read streams the archive again up to the entry.
pub struct TarGzCertificates {
    path: PathBuf,
    names: Vec<String>,
}

impl TarGzCertificates {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CertzError::ArchiveUnavailable(format!(
                "Certificate archive not found: {}",
                path.display()
            )));
        }
        let names = scan_names(path)
            .map_err(|e| CertzError::ArchiveUnavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            names,
        })
    }

    fn tarball(&self) -> std::io::Result<tar::Archive<GzDecoder<File>>> {
        let file = File::open(&self.path)?;
        Ok(tar::Archive::new(GzDecoder::new(file)))
    }
}

fn scan_names(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let mut names = Vec::new();
    for entry in archive.entries()? {
        let entry = entry?;
        if entry.header().entry_type().is_dir() {
            continue;
        }
        names.push(entry.path()?.to_string_lossy().into_owned());
    }
    Ok(names)
}

impl CertificateArchive for TarGzCertificates {
    fn entry_names(&mut self) -> Result<Vec<String>> {
        Ok(self.names.clone())
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let io_err = |e: std::io::Error| CertzError::ResolutionIo(format!("{}: {}", name, e));

        let mut archive = self.tarball().map_err(io_err)?;
        for entry in archive.entries().map_err(io_err)? {
            let mut entry = entry.map_err(io_err)?;
            if entry.path().map_err(io_err)?.to_string_lossy() != name {
                continue;
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).map_err(io_err)?;
            return Ok(bytes);
        }

        Err(CertzError::ResolutionIo(format!(
            "{}: entry vanished from {}",
            name,
            self.path.display()
        )))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
