//! Key-Value store wrapper with automatic serialization.

use std::rc::Rc;

use crate::{CacheError, MemoryBackend};
use serde::{de::DeserializeOwned, Serialize};

/// A string-keyed, string-valued persistent store.
///
/// Implemented by the browser's `localStorage` on `wasm32` and by
/// [`MemoryBackend`] everywhere else.
pub trait KvBackend {
    /// Read the raw value stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite the raw value stored under `key`.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`, plus raw string access for flags
/// that are stored unquoted.
#[derive(Clone)]
pub struct Cache {
    backend: Rc<dyn KvBackend>,
}

impl Cache {
    /// Wrap a backend.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Wrap a backend that the caller keeps a handle to.
    ///
    /// # Example
    ///
    /// ```
    /// use std::rc::Rc;
    /// use techstore_cache::{Cache, KvBackend, MemoryBackend};
    ///
    /// let backend = Rc::new(MemoryBackend::new());
    /// let cache = Cache::from_shared(backend.clone());
    /// cache.set_string("theme", "dark").unwrap();
    /// assert_eq!(backend.get_raw("theme").unwrap().as_deref(), Some("dark"));
    /// ```
    pub fn from_shared(backend: Rc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// A cache backed by a fresh in-memory map.
    pub fn memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open the browser's `localStorage`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_local()?;
    /// ```
    #[cfg(target_arch = "wasm32")]
    pub fn open_local() -> Result<Self, CacheError> {
        Ok(Self::new(crate::LocalStorageBackend::open()?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartLine>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing whatever was there.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set_raw(key, &raw)
    }

    /// Get a raw string value without JSON decoding.
    pub fn get_string(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.backend.get_raw(key)
    }

    /// Set a raw string value without JSON encoding.
    pub fn set_string(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.backend.set_raw(key, value)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}
