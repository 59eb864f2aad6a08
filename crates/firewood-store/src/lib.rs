//! # firewood-store: Local Persistence for the Firewood Storefront
//!
//! SQLite (through sqlx) stands in for the browser's localStorage, and a
//! plain directory stands in for the downloads folder.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/storefront                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  firewood-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │   │ LocalStorageRepo  │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄──│ get/set/remove    │   │ (embedded)  │  │   │
//! │  │   └───────────────┘   └───────────────────┘   └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐                                             │   │
//! │  │   │ DocumentStore │ ──► <output dir>/FirewoodOrderReceipt.pdf   │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use firewood_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//! let saved = db.local_storage().get("firewoodCart").await?;
//! ```

pub mod documents;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use documents::DocumentStore;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::local_storage::LocalStorageRepository;
