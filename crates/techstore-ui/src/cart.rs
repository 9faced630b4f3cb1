//! Cart actions and the cart badge.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use techstore_cache::Cache;
use techstore_commerce::{AddToCart, Cart, CartLine, CartStore, ProductId};
use techstore_observability::StructuredLogger;

use crate::document::Document;
use crate::error::UiError;
use crate::notification::{NotificationService, Severity};

pub const ADDED_TO_CART: &str = "Product added to cart!";

/// What [`CartManager::add_to_cart`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum AddToCartOutcome {
    /// The line after the change, and the new badge count.
    Added { line: CartLine, total_items: u32 },
    /// Not in the catalog. Nothing changed and nothing was shown.
    UnknownProduct(ProductId),
}

/// Owns the persisted cart and keeps the badge in step with it.
pub struct CartManager {
    store: RefCell<CartStore>,
    document: Rc<dyn Document>,
    notifications: Rc<NotificationService>,
    badge_id: Option<String>,
    logger: StructuredLogger,
}

impl CartManager {
    /// Load the cart stored under `key`.
    ///
    /// A stored value that is not a cart is logged and replaced by an empty
    /// cart on the next write.
    pub fn load(
        cache: Cache,
        key: &str,
        document: Rc<dyn Document>,
        notifications: Rc<NotificationService>,
        badge_id: Option<String>,
        logger: StructuredLogger,
    ) -> Self {
        let store = match CartStore::load(cache.clone(), key) {
            Ok(store) => store,
            Err(e) => {
                logger
                    .warn("Stored cart is unreadable, starting empty")
                    .field("key", key)
                    .field("error", e.to_string())
                    .emit();
                CartStore::empty(cache, key)
            }
        };

        Self {
            store: RefCell::new(store),
            document,
            notifications,
            badge_id,
            logger,
        }
    }

    /// Add one unit of a catalog product, persist, notify and refresh the badge.
    pub fn add_to_cart(&self, id: ProductId) -> Result<AddToCartOutcome, UiError> {
        let added = self.store.borrow_mut().add_product(id)?;
        match added {
            AddToCart::UnknownProduct(id) => {
                self.logger
                    .debug("Ignoring unknown product")
                    .field("product_id", id.get())
                    .emit();
                Ok(AddToCartOutcome::UnknownProduct(id))
            }
            AddToCart::Added(line) => {
                self.notifications.show(ADDED_TO_CART, Severity::Success);
                let total_items = self.update_badge();
                Ok(AddToCartOutcome::Added { line, total_items })
            }
        }
    }

    /// Recompute the item count and write it to the badge, if the page has one.
    pub fn update_badge(&self) -> u32 {
        let total_items = self.store.borrow().get().item_count();
        self.logger
            .info(format!("Cart has {} items", total_items))
            .field("total_items", total_items)
            .emit();

        if let Some(id) = &self.badge_id {
            self.document.set_text(id, &total_items.to_string());
        }
        total_items
    }

    /// A snapshot of the cart.
    pub fn cart(&self) -> Cart {
        self.store.borrow().get().clone()
    }
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("store", &self.store)
            .field("badge_id", &self.badge_id)
            .finish_non_exhaustive()
    }
}
