//! Storage error types.

/// Errors from the media object store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The operation needs S3 credentials that were not configured.
    #[error("Storage not configured: {0}")]
    NotConfigured(String),

    /// The object key is not a valid store path.
    #[error("Invalid object key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Underlying object store failure.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),
}
