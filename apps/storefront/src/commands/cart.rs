//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  steppers  ┌──────────┐  toggle  ┌──────────┐            │
//! │  │  Empty   │───────────►│ In Cart  │─────────►│  Modal   │            │
//! │  │  Cart    │◄───────────│          │◄─────────│  Open    │            │
//! │  └──────────┘  steppers  └──────────┘  toggle  └────┬─────┘            │
//! │       ▲                                             │ promo / address   │
//! │       │                                             ▼                   │
//! │       │                  place_order ◄──────── checkout                 │
//! │       │                       │                                         │
//! │       └───── receipt saved, cart zeroed, modal closed                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use firewood_core::pdf::to_pdf;
use firewood_core::receipt::cart_receipt;
use firewood_core::view::{
    render_cart_modal, render_cart_summary, render_shop, CartModalView, CartSummaryView, ShopView,
};
use firewood_core::{resolve_promo, Cart, Money, ORDER_PLACED_NOTICE, STORAGE_KEY};

use crate::error::ApiError;
use crate::state::{DbState, Shop, ShopState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoResponse {
    pub notice: String,
    pub cart: CartModalView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub notice: String,
    /// Where the receipt was written.
    pub path: PathBuf,
    pub summary: CartSummaryView,
}

fn modal(shop: &Shop) -> CartModalView {
    render_cart_modal(
        &shop.cart,
        shop.discount,
        shop.cart_open,
        &shop.promo_input,
        &shop.address,
    )
}

/// The product panel with steppers and the cart summary.
pub fn get_shop(shop: &ShopState) -> ShopView {
    debug!("get_shop command");
    shop.with_shop(|s| render_shop(&s.cart, s.discount))
}

pub fn get_cart(shop: &ShopState) -> CartModalView {
    debug!("get_cart command");
    shop.with_shop(modal)
}

/// Moves a product's quantity by `delta`, clamped at zero.
///
/// `product` is a slug (`oak`), a name (`Oak Bundle`) or a 1-based
/// position.
pub fn adjust_quantity(shop: &ShopState, product: &str, delta: i64) -> Result<ShopView, ApiError> {
    debug!(product = %product, delta, "adjust_quantity command");
    shop.with_shop_mut(|s| {
        let index = s.cart.position(product)?;
        s.cart.adjust(index, delta)?;
        Ok(render_shop(&s.cart, s.discount))
    })
}

/// Opens the cart modal if closed, closes it if open.
pub fn toggle_cart(shop: &ShopState) -> CartModalView {
    debug!("toggle_cart command");
    shop.with_shop_mut(|s| {
        s.cart_open = !s.cart_open;
        modal(s)
    })
}

/// Resolves the code and replaces the current discount.
pub fn apply_promo(shop: &ShopState, code: &str) -> PromoResponse {
    let outcome = resolve_promo(code);
    debug!(?outcome, "apply_promo command");
    shop.with_shop_mut(|s| {
        s.promo_input = code.to_string();
        s.discount = outcome.discount();
        PromoResponse {
            notice: outcome.notice(),
            cart: modal(s),
        }
    })
}

pub fn set_address(shop: &ShopState, address: &str) -> CartModalView {
    debug!(len = address.len(), "set_address command");
    shop.with_shop_mut(|s| {
        s.address = address.to_string();
        modal(s)
    })
}

/// What a receipt covered, captured before the lock is released.
struct CheckedOut {
    ordered: Vec<u32>,
    promo_input: String,
    address: String,
}

impl CheckedOut {
    /// Takes the receipted order off the shop. Edits made since capture
    /// survive.
    fn reset(self, s: &mut Shop) -> CartSummaryView {
        s.cart.remove_ordered(&self.ordered);
        if s.promo_input == self.promo_input && s.address == self.address {
            s.discount = Money::zero();
            s.promo_input.clear();
            s.address.clear();
        } else {
            debug!("Checkout details edited during save; keeping them");
        }
        s.cart_open = false;
        render_cart_summary(&s.cart, s.discount)
    }
}

/// Checkout: writes the cart receipt and resets the cart.
///
/// ## Flow
/// 1. Under the lock: check preconditions, lay out the receipt and note
///    what it covers
/// 2. Lock released: encode and save the PDF
/// 3. Under the lock: take the receipted quantities off the cart, close
///    the modal, and clear discount, promo and address unless they were
///    edited during the save
///
/// Nothing changes if a precondition fails or the file cannot be written.
/// Steppers pressed while the file is written are kept for the next order.
pub async fn place_order(shop: &ShopState, db: &DbState) -> Result<CheckoutResponse, ApiError> {
    debug!("place_order command");
    let (receipt, ordered, promo_input, address) = shop.with_shop(|s| {
        let receipt = cart_receipt(&s.cart, s.discount, &s.address)?;
        Ok::<_, ApiError>((
            receipt,
            s.cart.quantities(),
            s.promo_input.clone(),
            s.address.clone(),
        ))
    })?;

    let bytes = to_pdf(&receipt);
    let path = db.documents().save(&receipt.filename, &bytes).await?;

    let summary = shop.with_shop_mut(|s| {
        let checked_out = CheckedOut {
            ordered,
            promo_input,
            address,
        };
        checked_out.reset(s)
    });

    info!(path = %path.display(), "Order placed");
    Ok(CheckoutResponse {
        notice: ORDER_PLACED_NOTICE.to_string(),
        path,
        summary,
    })
}

// =============================================================================
// Load / Unload
// =============================================================================

/// Builds the cart from the catalog and restores saved quantities.
///
/// An unreadable saved value is logged and ignored.
pub async fn restore_cart(db: &DbState) -> Result<Cart, ApiError> {
    let mut cart = Cart::new();
    let Some(raw) = db.inner().local_storage().get(STORAGE_KEY).await? else {
        debug!("No saved cart");
        return Ok(cart);
    };

    match cart.restore_from_json(&raw) {
        Ok(()) => info!(items = cart.total_items(), "Saved cart restored"),
        Err(e) => warn!("Ignoring saved cart: {}", e),
    }
    Ok(cart)
}

/// Writes every line, zero quantities included, under the storage key.
pub async fn save_cart(shop: &ShopState, db: &DbState) -> Result<(), ApiError> {
    let snapshot = shop.with_shop(|s| s.cart.snapshot());
    db.inner()
        .local_storage()
        .save_json(STORAGE_KEY, &snapshot)
        .await?;
    debug!(lines = snapshot.len(), "Cart saved");
    Ok(())
}
