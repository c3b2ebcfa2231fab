//! Path management for the wallet
//!
//! Resolves where the settings file lives and where relative wallet paths
//! point.
//!
//! ## Path Resolution Order
//!
//! 1. `WALLET_CLI_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/wallet-cli` or `~/.config/wallet-cli`
//! 3. Windows: `%APPDATA%\wallet-cli`

use std::path::{Path, PathBuf};

use crate::error::WalletError;

/// Manages the paths used by the wallet
#[derive(Debug, Clone)]
pub struct WalletPaths {
    /// Directory holding the settings file
    config_dir: PathBuf,
}

impl WalletPaths {
    /// Create a new WalletPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, WalletError> {
        let config_dir = if let Ok(custom) = std::env::var("WALLET_CLI_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { config_dir })
    }

    /// Create WalletPaths with a custom config directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), WalletError> {
        std::fs::create_dir_all(&self.config_dir)
            .map_err(|e| WalletError::Io(format!("Failed to create config directory: {}", e)))
    }
}

/// Make `path` absolute by joining it to the current working directory
pub fn absolutize(path: &Path) -> Result<PathBuf, WalletError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|e| {
        WalletError::Config(format!("Could not determine current directory: {}", e))
    })?;
    Ok(cwd.join(path))
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, WalletError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| WalletError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("wallet-cli"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, WalletError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| WalletError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("wallet-cli"))
}
