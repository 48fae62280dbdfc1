/// Errors from blob storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key is not a bare canonical asset identifier.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused or failed the operation.
    #[error("backend '{backend}' failed: {reason}")]
    Backend {
        backend: &'static str,
        reason: String,
    },

    /// A lock guarding backend state was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn backend(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            reason: reason.into(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
