//! Static product catalog.
//!
//! The storefront page renders products server-side; the client only needs
//! enough of each product to build a cart line.

use crate::ids::ProductId;
use crate::money::Money;
use serde::Serialize;

/// A product as known to the client-side cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: &'static str,
    pub price: Money,
}

const ENTRIES: [CatalogEntry; 4] = [
    CatalogEntry {
        id: ProductId::new(1),
        name: "Wireless Headphones",
        price: Money::usd(9999),
    },
    CatalogEntry {
        id: ProductId::new(2),
        name: "Smart Watch",
        price: Money::usd(19999),
    },
    CatalogEntry {
        id: ProductId::new(3),
        name: "Laptop",
        price: Money::usd(89999),
    },
    CatalogEntry {
        id: ProductId::new(4),
        name: "Smartphone",
        price: Money::usd(69999),
    },
];

/// The hardcoded, read-only catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    /// All entries in display order.
    pub fn entries(&self) -> &'static [CatalogEntry] {
        &ENTRIES
    }

    /// Find an entry by id (linear search).
    pub fn find(&self, id: ProductId) -> Option<&'static CatalogEntry> {
        ENTRIES.iter().find(|entry| entry.id == id)
    }
}
