//! # Delivery Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Delivery Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Rejected (non-2xx,     │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  acknowledged mode)     │ │
//! │  │  MissingUrl     │  │                 │  │  SerializationFailed    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for delivery operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid webhook configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// No webhook URL configured.
    #[error("Webhook URL not configured")]
    MissingUrl,

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// Non-2xx response in acknowledged mode.
    #[error("Webhook rejected the order with status {status}")]
    Rejected { status: u16 },

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    // =========================================================================
    // I/O Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::SerializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl SyncError {
    /// Whether the request may have reached the webhook.
    ///
    /// A rejected order did reach it; configuration errors never left the
    /// machine.
    pub fn reached_remote(&self) -> bool {
        matches!(self, SyncError::Rejected { .. } | SyncError::Timeout(_))
    }
}
