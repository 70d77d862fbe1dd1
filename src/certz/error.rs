use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertzError {
    /// The tabular source could not be turned into a rectangular table.
    #[error("Could not load dataset: {0}")]
    Load(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No record found for identifier: {0}")]
    NotFound(String),

    /// The record exists but carries no usable reference value.
    #[error("No reference number found for this record")]
    MissingReference { identifier: Option<String> },

    #[error("Certificate archive unavailable: {0}")]
    ArchiveUnavailable(String),

    #[error("Certificate not found for reference number: {0}")]
    CertificateNotFound(String),

    #[error("Error retrieving certificate: {0}")]
    ResolutionIo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CertzError>;
