//! Error types for the tabsync library

use std::io;

/// Library error type for tabsync operations
#[derive(Debug, thiserror::Error)]
pub enum TabSyncError {
    /// Malformed or insufficient input to a pure function (anchors, tuning, local config)
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Tablature structure that cannot be compiled (unknown duration, string out of range)
    #[error("structural inconsistency: {0}")]
    StructuralInconsistency(String),

    /// Sync data is empty or unparsable
    #[error("missing anchor data: {0}")]
    MissingAnchorData(String),

    /// Parsing error when reading tablature or sync files
    #[error("parsing error: {0}")]
    ParsingError(String),

    /// Failure while writing the arrangement document
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for TabSyncError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
