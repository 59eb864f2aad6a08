//! # firewood-core: Pure Storefront Logic for Honest Abe's Firewood
//!
//! This crate holds every rule of the storefront as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Firewood Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Adapter (terminal, or browser via ts-rs)        │   │
//! │  │     steppers ──► cart modal ──► promo ──► order form ──► PDF    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (ShopState + commands)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ firewood-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌────────────┐ ┌─────────────────┐   │   │
//! │  │   │ money   │ │ cart    │ │ validation │ │ receipt + pdf   │   │   │
//! │  │   │ catalog │ │ promo   │ │ sanitize   │ │ view            │   │   │
//! │  │   │         │ │ order   │ │ submission │ │ chrome          │   │   │
//! │  │   └─────────┘ └─────────┘ └────────────┘ └─────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                    │                              │                     │
//! │  ┌─────────────────▼──────────────┐  ┌────────────▼────────────────┐   │
//! │  │ firewood-store (SQLite, files) │  │ firewood-sync (webhook)     │   │
//! │  └────────────────────────────────┘  └─────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cent money
//! - [`catalog`] - The three firewood bundles
//! - [`cart`] - Line items, steppers, totals, persisted shape
//! - [`promo`] - Promo code resolution
//! - [`order`] - Order form fields, draft, webhook payload, order numbers
//! - [`validation`] - Rules that gate a submission
//! - [`sanitize`] - Live input coercion
//! - [`submission`] - Submit state machine
//! - [`form`] - The open order dialog
//! - [`receipt`] / [`pdf`] - Document layout and PDF bytes
//! - [`view`] - View models for adapters
//! - [`chrome`] - Hero carousel, scroll header, dropdowns
//!
//! ## Example Usage
//!
//! ```rust
//! use firewood_core::{resolve_promo, Cart, CartTotals};
//!
//! let mut cart = Cart::new();
//! cart.increment(0).unwrap(); // Oak
//! cart.increment(0).unwrap(); // Oak
//! cart.increment(1).unwrap(); // Maple
//!
//! let discount = resolve_promo("campfire10").discount();
//! let totals = CartTotals::compute(&cart, discount);
//! assert_eq!(totals.total.to_plain_string(), "35.47");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod chrome;
pub mod error;
pub mod form;
pub mod money;
pub mod order;
pub mod pdf;
pub mod promo;
pub mod receipt;
pub mod sanitize;
pub mod submission;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, LineItem, PersistedLine};
pub use catalog::{Product, CATALOG};
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::OrderFormSession;
pub use money::Money;
pub use order::{generate_order_number, FormField, OrderDraft, OrderSubmission};
pub use promo::{resolve_promo, PromoOutcome};
pub use receipt::Document;
pub use submission::{SubmissionFlow, SubmissionState};
pub use validation::FormRules;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is persisted under.
pub const STORAGE_KEY: &str = "firewoodCart";

/// Notice after a successful checkout.
pub const ORDER_PLACED_NOTICE: &str = "Order placed! Receipt downloaded.";

/// Pallet cap used by the second storefront build.
///
/// Off unless configured; see `FormRules::max_quantity`.
pub const DEFAULT_MAX_PALLETS: u32 = 10;
