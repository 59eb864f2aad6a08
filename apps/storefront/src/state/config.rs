//! # Configuration State
//!
//! Storefront settings loaded at startup. Read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FIREWOOD_*`)
//! 2. Defaults (this file)
//!
//! The webhook has its own file-backed config in `firewood-sync`.

use std::path::{Path, PathBuf};

use firewood_core::FormRules;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the banner.
    pub store_name: String,

    /// Receipts and order confirmations are written here.
    pub output_dir: PathBuf,

    /// Database file override. `None` uses the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Pallet cap for the order form. `None` disables the check.
    pub max_pallets: Option<u32>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Honest Abe's Firewood".to_string(),
            output_dir: default_output_dir(),
            db_path: None,
            max_pallets: None,
        }
    }
}

impl ConfigState {
    /// ## Environment Variables
    /// - `FIREWOOD_STORE_NAME`: banner name
    /// - `FIREWOOD_OUTPUT_DIR`: where PDFs go
    /// - `FIREWOOD_DB_PATH`: database file
    /// - `FIREWOOD_MAX_PALLETS`: pallet cap, `0` to disable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("FIREWOOD_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(dir) = lookup("FIREWOOD_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(path) = lookup("FIREWOOD_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(max) = lookup("FIREWOOD_MAX_PALLETS") {
            match max.trim().parse::<u32>() {
                Ok(0) => config.max_pallets = None,
                Ok(n) => config.max_pallets = Some(n),
                Err(_) => tracing::warn!(value = %max, "Ignoring FIREWOOD_MAX_PALLETS"),
            }
        }

        config
    }

    pub fn form_rules(&self) -> FormRules {
        match self.max_pallets {
            Some(max) => FormRules::with_max_quantity(max),
            None => FormRules::default(),
        }
    }
}

/// The user's downloads folder, else `./receipts`.
fn default_output_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("receipts"))
}
