//! # firewood-sync: Order Delivery for the Firewood Storefront
//!
//! Sends a validated order submission to the order webhook (a spreadsheet
//! script in production) and reports whether it went out.
//!
//! ## Module Organization
//! - [`config`] - Webhook URL, delivery mode and timeout (TOML + env)
//! - [`error`] - Delivery error types
//! - [`webhook`] - The `OrderSink` seam and its reqwest implementation
//!
//! ## Usage
//! ```rust,ignore
//! use firewood_sync::{OrderSink, WebhookClient, WebhookConfig};
//!
//! let client = WebhookClient::new(WebhookConfig::load_or_default(None))?;
//! let delivery = client.deliver(&submission).await?;
//! ```

pub mod config;
pub mod error;
pub mod webhook;

pub use config::{DeliveryMode, WebhookConfig};
pub use error::{SyncError, SyncResult};
pub use webhook::{Delivery, OrderSink, WebhookClient};
