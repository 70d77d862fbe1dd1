use crate::error::{CertzError, Result};
use crate::resolver::DEFAULT_DOWNLOAD_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by `config` get/set, in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "dataset",
    "archive",
    "header-offset",
    "sheet",
    "download-prefix",
];

/// Configuration for certz, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertzConfig {
    /// Roster spreadsheet
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Certificate archive (.zip, .tar.gz or .tgz)
    #[serde(default)]
    pub archive_path: Option<PathBuf>,

    /// Rows to skip above the header row
    #[serde(default)]
    pub header_offset: usize,

    /// Sheet to read; the first sheet when unset
    #[serde(default)]
    pub sheet: Option<String>,

    /// Leading part of downloaded certificate file names
    #[serde(default = "default_download_prefix")]
    pub download_prefix: String,
}

fn default_download_prefix() -> String {
    DEFAULT_DOWNLOAD_PREFIX.to_string()
}

impl Default for CertzConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            archive_path: None,
            header_offset: 0,
            sheet: None,
            download_prefix: default_download_prefix(),
        }
    }
}

impl CertzConfig {
    pub fn path_in<P: AsRef<Path>>(config_dir: P) -> PathBuf {
        config_dir.as_ref().join(CONFIG_FILENAME)
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = Self::path_in(config_dir);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CertzConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::path_in(config_dir), content)?;
        Ok(())
    }

    /// Display value for a key. Unset optional values show as an empty string.
    pub fn get(&self, key: &str) -> Result<String> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        match key {
            "dataset" => Ok(path(&self.dataset_path)),
            "archive" => Ok(path(&self.archive_path)),
            "header-offset" => Ok(self.header_offset.to_string()),
            "sheet" => Ok(self.sheet.clone().unwrap_or_default()),
            "download-prefix" => Ok(self.download_prefix.clone()),
            other => Err(unknown_key(other)),
        }
    }

    /// Sets a key from its string form. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "dataset" => self.dataset_path = optional(value).map(PathBuf::from),
            "archive" => self.archive_path = optional(value).map(PathBuf::from),
            "header-offset" => {
                self.header_offset = value.parse().map_err(|_| {
                    CertzError::Config(format!(
                        "header-offset must be a non-negative integer, got '{}'",
                        value
                    ))
                })?
            }
            "sheet" => self.sheet = optional(value),
            "download-prefix" => {
                if value.is_empty() {
                    return Err(CertzError::Config(
                        "download-prefix cannot be empty".to_string(),
                    ));
                }
                self.download_prefix = value.to_string();
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> CertzError {
    CertzError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

/// Per-run values from the command line. `Some` wins over the stored config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dataset_path: Option<PathBuf>,
    pub archive_path: Option<PathBuf>,
    pub header_offset: Option<usize>,
    pub sheet: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: CertzConfig) -> CertzConfig {
        if let Some(path) = &self.dataset_path {
            config.dataset_path = Some(path.clone());
        }
        if let Some(path) = &self.archive_path {
            config.archive_path = Some(path.clone());
        }
        if let Some(offset) = self.header_offset {
            config.header_offset = offset;
        }
        if let Some(sheet) = &self.sheet {
            config.sheet = Some(sheet.clone());
        }
        config
    }
}
