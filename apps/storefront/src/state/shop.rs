//! # Shop State
//!
//! Everything the page holds between events: the cart, the promo and
//! address inputs, the open dialogs and the page chrome.
//!
//! ## Lifecycle of the Dialog Fields
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  cart_open:   false ──toggle──► true ──toggle / checkout──► false       │
//! │                                                                         │
//! │  form:        None ──open──► Some(session) ──cancel / success──► None   │
//! │                                                                         │
//! │  success:     None ──submit ok──► Some(modal) ──dismiss──► None         │
//! │                                                                         │
//! │  last_order:  None ──submit ok──► Some(order)   (replaced on next ok)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mutex is never held across an `.await`.

use std::sync::{Arc, Mutex, PoisonError};

use firewood_core::chrome::DropdownGroup;
use firewood_core::view::SuccessModalView;
use firewood_core::{Cart, Money, OrderFormSession, OrderSubmission};

/// Number of dropdown menus in the navigation bar.
pub const NAV_DROPDOWN_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct Shop {
    pub cart: Cart,
    pub discount: Money,
    /// Raw text of the promo input.
    pub promo_input: String,
    /// Raw text of the delivery address input.
    pub address: String,
    pub cart_open: bool,
    pub form: Option<OrderFormSession>,
    pub success: Option<SuccessModalView>,
    pub last_order: Option<OrderSubmission>,
    pub dropdowns: DropdownGroup,
    pub header_visible: bool,
}

impl Shop {
    pub fn new(cart: Cart) -> Self {
        Shop {
            cart,
            discount: Money::zero(),
            promo_input: String::new(),
            address: String::new(),
            cart_open: false,
            form: None,
            success: None,
            last_order: None,
            dropdowns: DropdownGroup::new(NAV_DROPDOWN_COUNT),
            header_visible: false,
        }
    }
}

impl Default for Shop {
    fn default() -> Self {
        Shop::new(Cart::new())
    }
}

/// Shared handle to the [`Shop`].
#[derive(Debug, Clone, Default)]
pub struct ShopState {
    shop: Arc<Mutex<Shop>>,
}

impl ShopState {
    pub fn new(shop: Shop) -> Self {
        ShopState {
            shop: Arc::new(Mutex::new(shop)),
        }
    }

    /// Executes a function with read access to the shop.
    pub fn with_shop<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Shop) -> R,
    {
        let shop = self.shop.lock().unwrap_or_else(PoisonError::into_inner);
        f(&shop)
    }

    /// Executes a function with write access to the shop.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shop_state.with_shop_mut(|shop| shop.cart.increment(0))?;
    /// ```
    pub fn with_shop_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Shop) -> R,
    {
        let mut shop = self.shop.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut shop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shop_is_closed_and_empty() {
        let state = ShopState::default();
        state.with_shop(|shop| {
            assert!(shop.cart.is_empty());
            assert!(shop.discount.is_zero());
            assert!(!shop.cart_open);
            assert!(shop.form.is_none());
            assert_eq!(shop.dropdowns.open_index(), None);
        });
    }

    #[test]
    fn test_clones_share_the_same_shop() {
        let state = ShopState::default();
        let other = state.clone();

        other.with_shop_mut(|shop| shop.cart.increment(1)).unwrap();
        assert_eq!(state.with_shop(|shop| shop.cart.total_items()), 1);
    }
}
