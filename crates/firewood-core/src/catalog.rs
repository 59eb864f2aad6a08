//! # Product Catalog
//!
//! The fixed set of firewood bundles offered by the shop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  slug      name              price    image              │
//! │  ───────   ───────────────   ──────   ─────────────────  │
//! │  oak       Oak Bundle        $15.99   images/oak.jpg     │
//! │  maple     Maple Bundle      $13.49   images/maple.jpg   │
//! │  hickory   Hickory Bundle    $18.25   images/hickory.jpg │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is created once at load and never changes. Cart positions
//! are catalog positions, which is also how the persisted cart is keyed.

use crate::money::Money;

/// A product available for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Short lowercase handle used by commands (`oak`, `maple`, ...).
    pub slug: &'static str,

    /// Display name shown in the cart and on receipts.
    pub name: &'static str,

    /// Unit price per bundle.
    pub price: Money,

    /// Relative image path for the product tile.
    pub image: &'static str,
}

/// The shop's catalog, in display order.
pub const CATALOG: [Product; 3] = [
    Product {
        slug: "oak",
        name: "Oak Bundle",
        price: Money::from_cents(1599),
        image: "images/oak.jpg",
    },
    Product {
        slug: "maple",
        name: "Maple Bundle",
        price: Money::from_cents(1349),
        image: "images/maple.jpg",
    },
    Product {
        slug: "hickory",
        name: "Hickory Bundle",
        price: Money::from_cents(1825),
        image: "images/hickory.jpg",
    },
];

impl Product {
    /// Checks whether `key` names this product.
    ///
    /// Accepts the slug or the full name, ignoring case and surrounding
    /// whitespace.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.slug.eq_ignore_ascii_case(key) || self.name.eq_ignore_ascii_case(key)
    }
}

/// Finds a product position by slug or name.
pub fn position_of(key: &str) -> Option<usize> {
    CATALOG.iter().position(|p| p.matches(key))
}
