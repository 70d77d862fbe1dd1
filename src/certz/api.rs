//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for certz operations, regardless of the UI in front of it.
//!
//! The facade:
//! - **Owns** the [`RecordIndex`] and the archive location
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no terminal I/O and no formatting.
//!
//! ## Generic Over TableSource
//!
//! `CertzApi<S: TableSource>` is generic over where the roster comes from:
//! - Production: `CertzApi<WorkbookSource>`
//! - Testing: `CertzApi<MemorySource>`
//!
//! `config` and `init` only touch the config directory and `manifest` only the
//! archive. They work before any dataset is configured, so they are also free
//! functions.

use crate::commands;
use crate::error::Result;
use crate::index::RecordIndex;
use crate::resolver::DEFAULT_DOWNLOAD_PREFIX;
use crate::source::TableSource;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, DatasetStatus, MessageLevel};

pub struct CertzApi<S: TableSource> {
    index: RecordIndex<S>,
    archive_path: Option<PathBuf>,
    download_prefix: String,
}

impl<S: TableSource> CertzApi<S> {
    pub fn new(index: RecordIndex<S>) -> Self {
        Self {
            index,
            archive_path: None,
            download_prefix: DEFAULT_DOWNLOAD_PREFIX.to_string(),
        }
    }

    pub fn with_archive(mut self, path: Option<PathBuf>) -> Self {
        self.archive_path = path;
        self
    }

    pub fn with_download_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.download_prefix = prefix.into();
        self
    }

    pub fn index(&self) -> &RecordIndex<S> {
        &self.index
    }

    pub fn archive_path(&self) -> Option<&Path> {
        self.archive_path.as_deref()
    }

    pub fn lookup(&self, identifier: &str) -> Result<CmdResult> {
        commands::lookup::run(&self.index, identifier)
    }

    pub fn certificate(&self, identifier: &str) -> Result<CmdResult> {
        commands::certificate::run(
            &self.index,
            self.archive_path(),
            identifier,
            &self.download_prefix,
        )
    }

    pub fn manifest(&self, filter: Option<&str>, ignore_case: bool) -> Result<CmdResult> {
        manifest(self.archive_path(), filter, ignore_case)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.index, self.archive_path())
    }

    /// Reloads the dataset. On failure the previously loaded records stay in use.
    pub fn reload(&self) -> Result<CmdResult> {
        let set = self.index.reload()?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success(format!(
            "Loaded {} records from {}",
            set.len(),
            set.source()
        )));
        Ok(result)
    }
}

/// Lists an archive without needing a roster.
pub fn manifest(
    archive_path: Option<&Path>,
    filter: Option<&str>,
    ignore_case: bool,
) -> Result<CmdResult> {
    commands::manifest::run(archive_path, filter, ignore_case)
}

pub fn config(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(config_dir, action)
}

pub fn init(config_dir: &Path) -> Result<CmdResult> {
    commands::init::run(config_dir)
}
