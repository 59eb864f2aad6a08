//! # Page Chrome Commands
//!
//! Hero image, sticky header and navigation dropdowns.

use serde::Serialize;
use tracing::debug;

use firewood_core::chrome::scroll_header_visible;

use crate::state::{HeroTicker, ShopState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownView {
    /// Index of the open dropdown, if any.
    pub open: Option<usize>,
}

pub fn hero_image(hero: &HeroTicker) -> &'static str {
    hero.current()
}

/// Records the scroll offset. Returns whether the sticky header shows.
pub fn scroll(shop: &ShopState, scroll_y: f64) -> bool {
    let visible = scroll_header_visible(scroll_y);
    debug!(scroll_y, visible, "scroll command");
    shop.with_shop_mut(|s| s.header_visible = visible);
    visible
}

/// Toggles one dropdown; every other dropdown closes.
pub fn toggle_dropdown(shop: &ShopState, index: usize) -> DropdownView {
    debug!(index, "toggle_dropdown command");
    shop.with_shop_mut(|s| {
        s.dropdowns.toggle(index);
        DropdownView {
            open: s.dropdowns.open_index(),
        }
    })
}

/// A click outside the menus.
pub fn close_dropdowns(shop: &ShopState) -> DropdownView {
    shop.with_shop_mut(|s| {
        s.dropdowns.close_all();
        DropdownView { open: None }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_threshold() {
        let shop = ShopState::default();
        assert!(!scroll(&shop, 100.0));
        assert!(scroll(&shop, 100.5));
        assert!(shop.with_shop(|s| s.header_visible));
        assert!(!scroll(&shop, 0.0));
    }

    #[test]
    fn test_only_one_dropdown_open() {
        let shop = ShopState::default();
        assert_eq!(toggle_dropdown(&shop, 0).open, Some(0));
        assert_eq!(toggle_dropdown(&shop, 2).open, Some(2));
        assert_eq!(toggle_dropdown(&shop, 2).open, None);

        toggle_dropdown(&shop, 1);
        assert_eq!(close_dropdowns(&shop).open, None);
    }
}
