//! # Storefront Commands
//!
//! Every user event the page knows maps to one function here.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Steppers, cart modal, promo, checkout
//! ├── order.rs    ◄─── Order form, submission, order PDF
//! └── page.rs     ◄─── Hero carousel, scroll header, dropdowns
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  adapter event ──► command(&ShopState, args) ──► Result<View, ApiError> │
//! │                          │                                              │
//! │                          ├── lock, mutate, unlock                       │
//! │                          ├── (await I/O with the lock released)         │
//! │                          └── render a view model from firewood-core     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod cart;
pub mod order;
pub mod page;

use chrono::{Local, NaiveDate};

/// Local calendar date, the reference for "date needed".
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
