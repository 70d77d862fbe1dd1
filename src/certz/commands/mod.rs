use crate::config::CertzConfig;
use crate::model::Record;
use crate::resolver::Certificate;
use chrono::{DateTime, Utc};

pub mod certificate;
pub mod config;
pub mod init;
pub mod lookup;
pub mod manifest;
pub mod status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Summary of the loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatus {
    pub source: String,
    pub records: usize,
    pub columns: Vec<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    /// Identifier of the first record, if it has one.
    pub sample_identifier: Option<String>,
    pub archive: Option<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub records: Vec<Record>,
    pub certificate: Option<Certificate>,
    pub entries: Vec<String>,
    pub status: Option<DatasetStatus>,
    pub config: Option<CertzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn with_certificate(mut self, certificate: Certificate) -> Self {
        self.certificate = Some(certificate);
        self
    }

    pub fn with_entries(mut self, entries: Vec<String>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_status(mut self, status: DatasetStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_config(mut self, config: CertzConfig) -> Self {
        self.config = Some(config);
        self
    }
}
