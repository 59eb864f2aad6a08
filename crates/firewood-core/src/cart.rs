//! # Cart
//!
//! The in-memory cart: one line per catalog product, mutated by the
//! quantity steppers and never shrunk.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Operation               Cart Change           │
//! │  ───────────              ─────────               ───────────           │
//! │                                                                         │
//! │  Click "+" ──────────────► increment(i) ────────► items[i].qty += 1     │
//! │                                                                         │
//! │  Click "−" ──────────────► decrement(i) ────────► items[i].qty -= 1     │
//! │                                                  (clamped at 0)         │
//! │                                                                         │
//! │  Place order ────────────► clear() ─────────────► every qty = 0         │
//! │                                                                         │
//! │  Page unload ────────────► snapshot() ──────────► Vec<PersistedLine>    │
//! │                                                                         │
//! │  Page load ──────────────► restore_from_json() ─► qty by position       │
//! │                                                                         │
//! │  NOTE: Lines are never added or removed. A zero quantity simply         │
//! │        hides the line from the modal and the receipt.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Product, CATALOG};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    /// Creates a zero-quantity line for a catalog product.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            name: product.name.to_string(),
            unit_price: product.price,
            image: product.image.to_string(),
            quantity: 0,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Persisted Shape
// =============================================================================

/// The JSON shape stored under the `firewoodCart` key, one per position.
///
/// `price` is stored as a decimal number of dollars so the stored value
/// stays readable by the browser build of the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLine {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - `items.len() == CATALOG.len()`, in catalog order
/// - Quantities never go below zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a cart with every catalog product at quantity 0.
    pub fn new() -> Self {
        Cart {
            items: CATALOG.iter().map(LineItem::from_product).collect(),
        }
    }

    /// All lines, including zero-quantity ones.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Lines with a non-zero quantity, in catalog order.
    pub fn ordered_lines(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.quantity > 0)
    }

    /// Resolves a product key (slug, name or 1-based position) to an index.
    pub fn position(&self, key: &str) -> CoreResult<usize> {
        if let Some(index) = catalog::position_of(key) {
            return Ok(index);
        }
        match key.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.items.len() => Ok(n - 1),
            _ => Err(CoreError::ProductNotFound(key.trim().to_string())),
        }
    }

    /// Adds `delta` to the quantity at `index`, clamping at zero.
    ///
    /// Returns the new quantity.
    pub fn adjust(&mut self, index: usize, delta: i64) -> CoreResult<u32> {
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| CoreError::ProductNotFound(format!("#{}", index + 1)))?;

        let next = i64::from(item.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        Ok(item.quantity)
    }

    /// The "+" stepper.
    pub fn increment(&mut self, index: usize) -> CoreResult<u32> {
        self.adjust(index, 1)
    }

    /// The "−" stepper. A decrement at zero is a no-op.
    pub fn decrement(&mut self, index: usize) -> CoreResult<u32> {
        self.adjust(index, -1)
    }

    /// Sum of all quantities, saturating at `u32::MAX`.
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Σ unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// True when every quantity is zero.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Current quantity of every line, in catalog order.
    pub fn quantities(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.quantity).collect()
    }

    /// Takes `ordered` quantities off the cart, line by line, never below
    /// zero. Anything added after `ordered` was captured stays.
    pub fn remove_ordered(&mut self, ordered: &[u32]) {
        for (item, qty) in self.items.iter_mut().zip(ordered) {
            item.quantity = item.quantity.saturating_sub(*qty);
        }
    }

    /// Resets every quantity to zero. Lines are kept.
    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.quantity = 0;
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Produces the stored representation of the cart.
    pub fn snapshot(&self) -> Vec<PersistedLine> {
        self.items
            .iter()
            .map(|item| PersistedLine {
                name: item.name.clone(),
                price: item.unit_price.cents() as f64 / 100.0,
                image: item.image.clone(),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Serializes [`Cart::snapshot`] to a JSON string.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(&self.snapshot())
            .map_err(|e| CoreError::CorruptSnapshot(e.to_string()))
    }

    /// Restores quantities from a stored JSON array, by position.
    ///
    /// The stored value must be a JSON array. Within it, any entry that is
    /// missing, not an object, or whose `quantity` is not a non-negative
    /// integer restores as 0. Names and prices always come from the
    /// catalog, never from storage.
    pub fn restore_from_json(&mut self, json: &str) -> CoreResult<()> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CoreError::CorruptSnapshot(e.to_string()))?;

        let entries = value
            .as_array()
            .ok_or_else(|| CoreError::CorruptSnapshot("expected a JSON array".to_string()))?;

        for (index, item) in self.items.iter_mut().enumerate() {
            item.quantity = entries
                .get(index)
                .and_then(|entry| entry.get("quantity"))
                .and_then(serde_json::Value::as_u64)
                .and_then(|qty| u32::try_from(qty).ok())
                .unwrap_or(0);
        }
        Ok(())
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart figures shown by the summary and the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub total_items: u32,
    pub subtotal: Money,
    pub discount: Money,
    /// `subtotal - discount`, floored at zero.
    pub total: Money,
}

impl CartTotals {
    pub fn compute(cart: &Cart, discount: Money) -> Self {
        let subtotal = cart.subtotal();
        CartTotals {
            total_items: cart.total_items(),
            subtotal,
            discount,
            total: subtotal.minus_floored(discount),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
