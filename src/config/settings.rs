//! User settings for the wallet
//!
//! Manages the default wallet file location and display preferences.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::{absolutize, WalletPaths};
use crate::error::WalletError;

/// User settings for the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Wallet file used when no path is given; relative to the working directory
    #[serde(default = "default_wallet_file")]
    pub default_wallet_file: PathBuf,

    /// Number of entries shown per page in listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Currency symbol prefixed to displayed amounts
    #[serde(default)]
    pub currency_symbol: String,

    /// Date format used when displaying entries (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_wallet_file() -> PathBuf {
    PathBuf::from("data").join("wallet.json")
}

fn default_page_size() -> usize {
    5
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_wallet_file: default_wallet_file(),
            page_size: default_page_size(),
            currency_symbol: String::new(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use default settings if the file doesn't exist
    pub fn load_or_create(paths: &WalletPaths) -> Result<Self, WalletError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                WalletError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                WalletError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WalletPaths) -> Result<(), WalletError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            WalletError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            WalletError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Absolute path of the default wallet file
    pub fn resolve_wallet_path(&self) -> Result<PathBuf, WalletError> {
        absolutize(&self.default_wallet_file)
    }

    /// Page size clamped to at least one entry
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
