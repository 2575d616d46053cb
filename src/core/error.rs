use thiserror::Error;

/// Failures raised by the key-value store layer.
///
/// These never escape the ledger or gallery: both log and carry on.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
