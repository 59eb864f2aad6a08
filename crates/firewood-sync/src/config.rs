//! # Webhook Configuration
//!
//! Where order submissions go and how their responses are treated.
//!
//! ## Configuration Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Loading Order                          │
//! │                                                                         │
//! │  1. Defaults           url = "", mode = opaque, no timeout              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. webhook.toml       explicit path, else the platform config dir      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Environment        FIREWOOD_WEBHOOK_URL                             │
//! │                        FIREWOOD_DELIVERY_MODE                           │
//! │                        FIREWOOD_WEBHOOK_TIMEOUT_SECS                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example webhook.toml
//! ```toml
//! url = "https://script.google.com/macros/s/XXXX/exec"
//! mode = "acknowledged"
//! timeout_secs = 15
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};

/// How a webhook response decides success.
///
/// ```text
/// ┌──────────────┬──────────────────────────┬─────────────────────────────┐
/// │ Mode         │ Success when             │ Non-2xx status              │
/// ├──────────────┼──────────────────────────┼─────────────────────────────┤
/// │ opaque       │ the request was sent     │ logged, still a success     │
/// │ acknowledged │ the webhook answered 2xx │ failure                     │
/// └──────────────┴──────────────────────────┴─────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    #[default]
    Opaque,
    Acknowledged,
}

impl DeliveryMode {
    pub fn requires_success_status(&self) -> bool {
        matches!(self, DeliveryMode::Acknowledged)
    }
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMode::Opaque => write!(f, "opaque"),
            DeliveryMode::Acknowledged => write!(f, "acknowledged"),
        }
    }
}

impl std::str::FromStr for DeliveryMode {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "opaque" | "no-cors" | "fire-and-forget" => Ok(DeliveryMode::Opaque),
            "acknowledged" | "ack" | "strict" => Ok(DeliveryMode::Acknowledged),
            other => Err(SyncError::InvalidConfig(format!(
                "Unknown delivery mode: {}",
                other
            ))),
        }
    }
}

/// Webhook settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Target of the POST. Empty means "not configured".
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub mode: DeliveryMode,

    /// Request timeout. `None` waits for as long as the transport does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        WebhookConfig {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (webhook.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading webhook config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load webhook config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Webhook config saved");
        Ok(())
    }

    /// An empty URL is valid here; the client refuses to send without one.
    pub fn validate(&self) -> SyncResult<()> {
        if !self.url.is_empty() {
            let parsed = url::Url::parse(&self.url)?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(SyncError::InvalidUrl(format!(
                    "Webhook URL must start with http:// or https://, got: {}",
                    self.url
                )));
            }
        }

        if self.timeout_secs == Some(0) {
            return Err(SyncError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FIREWOOD_WEBHOOK_URL") {
            debug!(url = %url, "Overriding webhook URL from environment");
            self.url = url;
        }

        if let Ok(mode) = std::env::var("FIREWOOD_DELIVERY_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding delivery mode from environment");
                    self.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown delivery mode in environment"),
            }
        }

        if let Ok(secs) = std::env::var("FIREWOOD_WEBHOOK_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.timeout_secs = Some(s);
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "honestabes", "firewood")
            .map(|dirs| dirs.config_dir().join("webhook.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
