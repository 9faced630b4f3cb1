//! Cart and cart line types.

use crate::catalog::CatalogEntry;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart: an ordered list of lines, at most one per product.
///
/// Serializes as a bare JSON array of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from already-persisted lines.
    ///
    /// Lines sharing an id are merged so the one-line-per-product rule holds
    /// even for hand-edited storage.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            match cart.lines.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add one unit of a catalog product.
    ///
    /// Increments the existing line for the product or appends a new line
    /// with quantity 1. Returns the line after the change.
    ///
    /// Only a quantity already at `u32::MAX` fails, with
    /// [`CommerceError::Overflow`].
    pub fn add_line(&mut self, product: &CatalogEntry) -> Result<&CartLine, CommerceError> {
        if let Some(index) = self.lines.iter().position(|l| l.id == product.id) {
            let line = &mut self.lines[index];
            line.quantity = line
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            return Ok(&self.lines[index]);
        }

        self.lines.push(CartLine::new(product));
        let last = self.lines.len() - 1;
        Ok(&self.lines[last])
    }

    /// Get a line by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// All lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, l| sum.saturating_add(l.quantity))
    }

    /// Get number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price x quantity across all lines.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.lines
            .iter()
            .map(CartLine::total)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .sum::<Option<Money>>()
            .ok_or(CommerceError::Overflow)
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price, persisted as a decimal number.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// A new line with quantity 1.
    pub fn new(product: &CatalogEntry) -> Self {
        Self {
            id: product.id,
            name: product.name.to_string(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Unit price times quantity.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.price
            .checked_times(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn product(id: u32) -> &'static CatalogEntry {
        Catalog.find(ProductId::new(id)).unwrap()
    }

    fn line(id: u32, quantity: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            name: format!("Product {}", id),
            price: Money::usd(1000),
            quantity,
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add_line(product(1)).unwrap();
        let line = cart.add_line(product(1)).unwrap();

        assert_eq!(line.quantity, 2);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_distinct_items() {
        let mut cart = Cart::new();
        cart.add_line(product(1)).unwrap();
        cart.add_line(product(2)).unwrap();

        assert_eq!(cart.unique_item_count(), 2);
        assert!(cart.lines().iter().all(|l| l.quantity == 1));
        assert_eq!(cart.lines()[0].name, "Wireless Headphones");
        assert_eq!(cart.lines()[1].name, "Smart Watch");
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = Cart::from_lines([line(1, 2), line(2, 3)]);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let cart = Cart::from_lines([line(1, 2), line(1, 1)]);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 3);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        cart.add_line(product(1)).unwrap();
        cart.add_line(product(1)).unwrap();
        cart.add_line(product(2)).unwrap();

        // 2 * 99.99 + 199.99
        assert_eq!(cart.subtotal().unwrap().cents(), 39997);
    }

    #[test]
    fn test_large_quantity_keeps_counting() {
        let mut cart = Cart::from_lines([line(1, 9999)]);
        assert_eq!(cart.add_line(product(1)).unwrap().quantity, 10000);
    }

    #[test]
    fn test_quantity_overflow() {
        let mut cart = Cart::from_lines([line(1, u32::MAX)]);
        assert!(matches!(
            cart.add_line(product(1)),
            Err(CommerceError::Overflow)
        ));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_json_shape() {
        let mut cart = Cart::new();
        cart.add_line(product(1)).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"name":"Wireless Headphones","price":99.99,"quantity":1}]"#
        );

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
