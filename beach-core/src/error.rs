/// Error types for the beach pollution core
use crate::site::SiteId;
use thiserror::Error;

/// Main error type for state engine and fixture operations
#[derive(Error, Debug)]
pub enum BeachError {
    /// A report referenced a site that is not monitored.
    ///
    /// The message is shown verbatim in the error banner.
    #[error("Beach not found")]
    SiteNotFound(SiteId),

    /// Failed to parse the site fixture CSV
    #[error("Failed to parse site fixture: {0}")]
    Csv(#[from] csv::Error),

    /// A fixture row parsed but holds unusable values
    #[error("Invalid site fixture row {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// Two fixture rows share the same site id
    #[error("Duplicate site id in fixture: {0}")]
    DuplicateSite(SiteId),

    /// Failed to decode a JSON action log
    #[error("Failed to parse action log: {0}")]
    ActionLog(#[from] serde_json::Error),
}

/// Type alias for Results using BeachError
pub type Result<T> = std::result::Result<T, BeachError>;
