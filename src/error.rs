use alloc::string::String;

use thiserror::Error;

/// Errors returned by [`Dictionary`](crate::Dictionary) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictError {
    /// The key is not present in the dictionary.
    #[error("key {key:?} not found")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },
}

impl DictError {
    pub(crate) fn not_found(key: &str) -> Self {
        DictError::NotFound { key: key.into() }
    }
}

/// Result alias for dictionary operations.
pub type Result<T, E = DictError> = core::result::Result<T, E>;
