//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐           │
//! │  │   DbState    │  │    ShopState     │  │   ConfigState    │           │
//! │  │              │  │                  │  │                  │           │
//! │  │  Database    │  │  Arc<Mutex<      │  │  store_name      │           │
//! │  │  Documents   │  │    Shop          │  │  output_dir      │           │
//! │  │              │  │  >>              │  │  max_pallets     │           │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘           │
//! │                                                                         │
//! │  ┌──────────────────────────────────────┐                               │
//! │  │  HeroTicker (own task, watch channel) │  shares nothing with Shop    │
//! │  └──────────────────────────────────────┘                               │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • ShopState: Protected by Arc<Mutex<T>>, never held across .await     │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod hero;
mod shop;

pub use config::ConfigState;
pub use db::DbState;
pub use hero::HeroTicker;
pub use shop::{Shop, ShopState, NAV_DROPDOWN_COUNT};
