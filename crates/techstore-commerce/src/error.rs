//! Commerce error types.

use thiserror::Error;

/// Failures of cart arithmetic and cart persistence.
#[derive(Error, Debug)]
pub enum CommerceError {
    #[error("cart total overflowed")]
    Overflow,

    /// The key-value store refused a read or write.
    #[error("cart storage failed: {0}")]
    Storage(String),

    /// The stored cart is not a JSON array of cart lines.
    #[error("stored cart is malformed: {0}")]
    Serialization(String),
}

impl From<techstore_cache::CacheError> for CommerceError {
    fn from(e: techstore_cache::CacheError) -> Self {
        match e {
            techstore_cache::CacheError::Serialize(inner) => {
                CommerceError::Serialization(inner.to_string())
            }
            other => CommerceError::Storage(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
