use crate::api::CertzApi;
use crate::config::{CertzConfig, ConfigOverrides};
use crate::error::{CertzError, Result};
use crate::index::RecordIndex;
use crate::loader::DatasetLoader;
use crate::source::workbook::WorkbookSource;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct CertzContext {
    pub config_dir: PathBuf,
    /// Stored config with command-line overrides applied.
    pub config: CertzConfig,
}

impl CertzContext {
    /// Builds the workbook-backed API and attempts the initial dataset load.
    pub fn api(&self) -> Result<CertzApi<WorkbookSource>> {
        let dataset = self.config.dataset_path.as_ref().ok_or_else(|| {
            CertzError::Config(
                "No dataset configured. Use --dataset or `certz config dataset <path>`".to_string(),
            )
        })?;

        let source = WorkbookSource::new(dataset).with_sheet(self.config.sheet.clone());
        let index = RecordIndex::open(source, DatasetLoader::new(self.config.header_offset));

        Ok(CertzApi::new(index)
            .with_archive(self.config.archive_path.clone())
            .with_download_prefix(self.config.download_prefix.clone()))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// The OS config directory for certz.
pub fn default_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "certz", "certz")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CertzError::Config("Could not determine config dir".to_string()))
}

pub fn initialize(config_dir: Option<PathBuf>, overrides: &ConfigOverrides) -> Result<CertzContext> {
    let config_dir = match config_dir {
        Some(dir) => dir,
        None => default_config_dir()?,
    };
    let config = overrides.apply(CertzConfig::load(&config_dir)?);
    Ok(CertzContext { config_dir, config })
}
