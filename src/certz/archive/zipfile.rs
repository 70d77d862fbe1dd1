use super::CertificateArchive;
use crate::error::{CertzError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

pub struct ZipCertificates {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ZipCertificates {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CertzError::ArchiveUnavailable(format!(
                "Certificate archive not found: {}",
                path.display()
            )));
        }
        let file = File::open(path)
            .map_err(|e| CertzError::ArchiveUnavailable(format!("{}: {}", path.display(), e)))?;
        let archive = ZipArchive::new(file)
            .map_err(|e| CertzError::ArchiveUnavailable(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }
}

impl CertificateArchive for ZipCertificates {
    fn entry_names(&mut self) -> Result<Vec<String>> {
        Ok(self
            .archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect())
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| CertzError::ResolutionIo(format!("{}: {}", name, e)))?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| CertzError::ResolutionIo(format!("{}: {}", name, e)))?;
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
