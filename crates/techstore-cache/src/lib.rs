//! Type-safe Key-Value persistence for the TechStore storefront.
//!
//! Wraps a string-keyed store (the browser's `localStorage`, or an in-memory
//! map natively and in tests) with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use techstore_cache::Cache;
//!
//! let cache = Cache::open_local()?;
//!
//! // Store a value
//! cache.set("cart", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<CartLine>> = cache.get("cart")?;
//!
//! // Flags are stored as plain strings
//! cache.set_string("theme", "dark")?;
//! ```

mod error;
mod kv;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

pub use error::CacheError;
pub use kv::{Cache, KvBackend};
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageBackend;
pub use memory::MemoryBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvBackend, MemoryBackend};
}
