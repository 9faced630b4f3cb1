//! Storefront domain types for TechStore.
//!
//! - **Catalog**: the static products the client can add to a cart
//! - **Cart**: lines, quantities, subtotal, and the persisted [`CartStore`]
//! - **Email**: the address check used by the newsletter form
//!
//! # Example
//!
//! ```rust
//! use techstore_cache::Cache;
//! use techstore_commerce::prelude::*;
//!
//! let mut store = CartStore::load(Cache::memory(), CART_KEY).unwrap();
//! store.add_product(ProductId::new(1)).unwrap();
//! store.add_product(ProductId::new(1)).unwrap();
//!
//! assert_eq!(store.get().item_count(), 2);
//! assert_eq!(store.get().subtotal().unwrap().display(), "$199.98");
//! ```

pub mod catalog;
pub mod cart;
pub mod email;
pub mod error;
pub mod ids;
pub mod money;

pub use cart::{AddToCart, Cart, CartLine, CartStore, CART_KEY};
pub use catalog::{Catalog, CatalogEntry};
pub use email::{is_valid_email, Email, EmailError};
pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{AddToCart, Cart, CartLine, CartStore, CART_KEY};
    pub use crate::catalog::{Catalog, CatalogEntry};
    pub use crate::email::{is_valid_email, Email, EmailError};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;
}
