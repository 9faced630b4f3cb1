//! Persisted cart.

use crate::cart::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::ProductId;
use techstore_cache::Cache;

/// Default storage key for the cart.
pub const CART_KEY: &str = "cart";

/// Result of [`CartStore::add_product`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddToCart {
    /// The product was added; carries the line after the change.
    Added(CartLine),
    /// The id is not in the catalog. Nothing changed.
    UnknownProduct(ProductId),
}

/// The cart together with the store it is persisted to.
///
/// Loaded once, then rewritten in full after every mutation.
#[derive(Debug)]
pub struct CartStore {
    cache: Cache,
    key: String,
    catalog: Catalog,
    cart: Cart,
}

impl CartStore {
    /// An empty cart bound to `cache` under `key`. Nothing is read or written.
    pub fn empty(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            catalog: Catalog,
            cart: Cart::new(),
        }
    }

    /// Load the cart stored under `key`, or start empty if there is none.
    ///
    /// Fails if the stored value is not a valid cart.
    pub fn load(cache: Cache, key: impl Into<String>) -> Result<Self, CommerceError> {
        let mut store = Self::empty(cache, key);
        let lines: Option<Vec<CartLine>> = store.cache.get(&store.key)?;
        store.cart = Cart::from_lines(lines.unwrap_or_default());
        Ok(store)
    }

    /// The current cart.
    pub fn get(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a catalog product and persist.
    ///
    /// An id missing from the catalog is not an error: the cart and the store
    /// are left untouched and [`AddToCart::UnknownProduct`] is returned.
    pub fn add_product(&mut self, id: ProductId) -> Result<AddToCart, CommerceError> {
        let Some(product) = self.catalog.find(id) else {
            return Ok(AddToCart::UnknownProduct(id));
        };
        let line = self.cart.add_line(product)?.clone();
        self.save()?;
        Ok(AddToCart::Added(line))
    }

    /// The JSON text written to the store.
    pub fn serialize(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(&self.cart)?)
    }

    /// Write the whole cart to the store.
    pub fn save(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &self.cart)?;
        Ok(())
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }
}
