use super::CertificateArchive;
use crate::error::{CertzError, Result};

/// In-memory archive for testing. Does NOT touch the filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: Vec<(String, Vec<u8>)>,
    broken_reads: bool,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, name: &str, bytes: &[u8]) -> Self {
        self.entries.push((name.to_string(), bytes.to_vec()));
        self
    }

    /// Entry list stays readable but every extraction fails.
    pub fn with_broken_reads(mut self) -> Self {
        self.broken_reads = true;
        self
    }
}

impl CertificateArchive for MemoryArchive {
    fn entry_names(&mut self) -> Result<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| !name.ends_with('/'))
            .collect())
    }

    fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        if self.broken_reads {
            return Err(CertzError::ResolutionIo(format!("{}: read failed", name)));
        }
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| CertzError::ResolutionIo(format!("{}: no such entry", name)))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
