//! Durable Store error types.

/// Store error type.
///
/// Only the write path produces errors; reads degrade to an empty
/// collection by contract.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage directory could not be created.
    #[error("failed to create storage directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A collection could not be serialized to JSON.
    #[error("failed to serialize collection '{collection}': {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A collection file could not be written.
    #[error("failed to write collection '{collection}': {source}")]
    Write {
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },
}
