//! Page chrome: hero image carousel, sticky scroll header and dropdown
//! menus. State only; the timer that drives the carousel lives in the app.

use std::time::Duration;

/// Hero background images, in rotation order.
pub const HERO_IMAGES: [&str; 4] = [
    "images/fire.jpg",
    "images/plainlogs.jpg",
    "images/greenlog.jpg",
    "images/samplegreenbg.jpg",
];

/// Time each hero image stays up.
pub const HERO_INTERVAL: Duration = Duration::from_secs(3);

/// Scroll offset past which the sticky header shows.
pub const SCROLL_HEADER_THRESHOLD: f64 = 100.0;

/// The rotating hero background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeroCarousel {
    index: usize,
}

impl HeroCarousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static str {
        HERO_IMAGES[self.index]
    }

    /// Moves to the next image, wrapping after the last.
    pub fn advance(&mut self) -> &'static str {
        self.index = (self.index + 1) % HERO_IMAGES.len();
        self.current()
    }
}

/// Whether the sticky header is shown at this scroll offset.
pub fn scroll_header_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_HEADER_THRESHOLD
}

/// A row of dropdown menus where at most one is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownGroup {
    open: Vec<bool>,
}

impl DropdownGroup {
    pub fn new(count: usize) -> Self {
        DropdownGroup {
            open: vec![false; count],
        }
    }

    /// Toggles one dropdown and closes every other one.
    ///
    /// Returns whether the toggled dropdown is now open. Unknown indices
    /// close everything, like a click outside.
    pub fn toggle(&mut self, index: usize) -> bool {
        let was_open = self.is_open(index);
        self.close_all();
        match self.open.get_mut(index) {
            Some(slot) => {
                *slot = !was_open;
                *slot
            }
            None => false,
        }
    }

    /// A click anywhere outside the menus.
    pub fn close_all(&mut self) {
        self.open.iter_mut().for_each(|slot| *slot = false);
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open.iter().position(|open| *open)
    }
}
