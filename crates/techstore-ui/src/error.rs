//! Error types for the storefront component.

use thiserror::Error;

use techstore_cache::CacheError;
use techstore_commerce::CommerceError;
use techstore_data::FetchError;

/// Errors that can occur in the storefront component.
#[derive(Error, Debug)]
pub enum UiError {
    /// Cart or catalog error.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Key-value store error.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// HTTP fetch error.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A browser API call failed.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for UiError {
    fn from(err: serde_json::Error) -> Self {
        UiError::Config(err.to_string())
    }
}
