use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolrEtlError {
    #[error("Solr request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Core '{core}' does not exist in Solr")]
    CoreNotFoundError { core: String },

    #[error("Solr rejected the update (status {status}): {body}")]
    IndexRejectionError { status: u16, body: String },

    #[error("JSON error: {0}")]
    EncodingError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl SolrEtlError {
    /// Process exit code for the CLI. Each failure class stays
    /// distinguishable for callers scripting around the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            SolrEtlError::InvalidConfigValueError { .. }
            | SolrEtlError::MissingConfigError { .. } => 2,
            SolrEtlError::CoreNotFoundError { .. } => 3,
            SolrEtlError::TransportError(_) => 4,
            SolrEtlError::IndexRejectionError { .. } => 5,
            SolrEtlError::EncodingError(_) | SolrEtlError::IoError(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SolrEtlError>;
