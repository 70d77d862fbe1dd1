use certz::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "certz", bin_name = "certz", version)]
#[command(
    about = "Look up students in a roster and fetch their certificates from an archive",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet", help_heading = "Options")]
    pub verbose: bool,

    /// Only show errors on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub quiet: bool,

    /// Directory holding config.json
    #[arg(long, global = true, env = "CERTZ_CONFIG_DIR", value_name = "DIR", help_heading = "Sources")]
    pub config_dir: Option<PathBuf>,

    /// Roster spreadsheet (overrides config)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Sources")]
    pub dataset: Option<PathBuf>,

    /// Certificate archive: .zip, .tar.gz or .tgz (overrides config)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Sources")]
    pub archive: Option<PathBuf>,

    /// Rows above the roster header row (overrides config)
    #[arg(long, global = true, value_name = "ROWS", help_heading = "Sources")]
    pub header_offset: Option<usize>,

    /// Roster sheet name (overrides config)
    #[arg(long, global = true, value_name = "NAME", help_heading = "Sources")]
    pub sheet: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            dataset_path: self.dataset.clone(),
            archive_path: self.archive.clone(),
            header_offset: self.header_offset,
            sheet: self.sheet.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the roster record for a Student ID
    #[command(alias = "l")]
    Lookup {
        /// Student ID to look up
        id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save the certificate for a Student ID
    #[command(alias = "d")]
    Download {
        /// Student ID whose certificate to fetch
        id: String,

        /// Directory to write the certificate into
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },

    /// List the entries of the certificate archive
    Manifest {
        /// Only entries whose name contains this text
        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,

        /// Match the filter regardless of case
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// Summarize the loaded roster
    Status,

    /// Get or set configuration values
    Config {
        /// Configuration key (dataset, archive, header-offset, sheet, download-prefix)
        key: Option<String>,

        /// Value to set (if omitted, shows current value)
        value: Option<String>,
    },

    /// Write a default config file
    Init,
}
