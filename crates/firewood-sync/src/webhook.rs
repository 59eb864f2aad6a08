//! # Order Webhook Client
//!
//! Posts one [`OrderSubmission`] as JSON to the configured webhook.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Delivery                                   │
//! │                                                                         │
//! │  submit_order (storefront)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderSink::deliver(&submission)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST <url>   Content-Type: application/json                            │
//! │       │                                                                 │
//! │       ├── transport error ─────────────────────► Err(Transport/Timeout) │
//! │       │                                                                 │
//! │       ├── response, mode = opaque ─────────────► Ok(Delivery)           │
//! │       │                                                                 │
//! │       └── response, mode = acknowledged                                 │
//! │                 ├── 2xx ───────────────────────► Ok(Delivery)           │
//! │                 └── other ─────────────────────► Err(Rejected)          │
//! │                                                                         │
//! │  One attempt. No retry.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use firewood_core::OrderSubmission;
use tracing::{debug, info, warn};

use crate::config::{DeliveryMode, WebhookConfig};
use crate::error::{SyncError, SyncResult};

/// What came back from a delivered submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub status: u16,
    pub mode: DeliveryMode,
}

impl Delivery {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Destination for order submissions.
///
/// The storefront depends on this seam rather than on HTTP directly.
pub trait OrderSink: Send + Sync {
    fn deliver(
        &self,
        order: &OrderSubmission,
    ) -> impl Future<Output = SyncResult<Delivery>> + Send;
}

// =============================================================================
// WebhookClient
// =============================================================================

#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// Builds the HTTP client, applying the configured timeout.
    pub fn new(config: WebhookConfig) -> SyncResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SyncError::InvalidConfig(e.to_string()))?;

        debug!(
            url = %config.url,
            mode = %config.mode,
            timeout_secs = ?config.timeout_secs,
            "Webhook client created"
        );
        Ok(WebhookClient { http, config })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    fn map_transport(&self, err: reqwest::Error) -> SyncError {
        if err.is_timeout() {
            SyncError::Timeout(self.config.timeout_secs.unwrap_or_default())
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}

impl OrderSink for WebhookClient {
    async fn deliver(&self, order: &OrderSubmission) -> SyncResult<Delivery> {
        if !self.config.is_configured() {
            return Err(SyncError::MissingUrl);
        }

        debug!(order_number = %order.order_number, url = %self.config.url, "Posting order");

        let response = self
            .http
            .post(&self.config.url)
            .json(order)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let delivery = Delivery {
            status: response.status().as_u16(),
            mode: self.config.mode,
        };

        if self.config.mode.requires_success_status() && !delivery.is_success_status() {
            warn!(
                order_number = %order.order_number,
                status = delivery.status,
                "Webhook rejected order"
            );
            return Err(SyncError::Rejected {
                status: delivery.status,
            });
        }

        info!(
            order_number = %order.order_number,
            status = delivery.status,
            mode = %delivery.mode,
            "Order submission sent"
        );
        Ok(delivery)
    }
}
