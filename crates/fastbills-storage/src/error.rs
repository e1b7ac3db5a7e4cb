//! Gateway error type.
//!
//! These errors stay inside the persistence boundary: the engine logs them
//! and continues on in-memory state. They never surface as a failure of a
//! business operation.

use thiserror::Error;

/// Persistence gateway failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored bytes for a key could not be parsed, or a value could
    /// not be serialized for storage.
    #[error("serialization failed for key `{key}`: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying file system failure.
    #[error("storage I/O failed for `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// No usable data directory could be resolved for the file gateway.
    #[error("could not resolve a data directory for storage")]
    NoDataDir,
}
