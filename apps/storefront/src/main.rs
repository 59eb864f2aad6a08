//! # Firewood Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin ──► terminal adapter ──► commands ──► ShopState                  │
//! │                                     │                                   │
//! │                                     ├──► SQLite (saved cart)            │
//! │                                     ├──► output dir (PDFs)              │
//! │                                     └──► order webhook (HTTP POST)      │
//! │  stdout ◄── view models as JSON          stderr ◄── logs                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs.

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    firewood_storefront::run()
        .await
        .context("firewood storefront failed")
}
