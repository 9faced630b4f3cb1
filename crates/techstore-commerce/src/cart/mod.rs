//! Shopping cart module.
//!
//! Contains the cart and line types and the persisted cart store.

mod cart;
mod store;

pub use cart::{Cart, CartLine};
pub use store::{AddToCart, CartStore, CART_KEY};
