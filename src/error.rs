//! Error types for record ingestion

use thiserror::Error;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, GedcomError>;

/// Hard failures that abort a run.
///
/// Rule violations are never reported through this type; they are
/// [`Finding`](crate::findings::Finding)s appended to the sink.
#[derive(Error, Debug)]
pub enum GedcomError {
    #[error("Malformed record at level {level}: '{tag}' '{argument}'")]
    MalformedRecord {
        level: u32,
        tag: String,
        argument: String,
    },

    #[error("Invalid date '{value}': {source}")]
    DateFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
