// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for the studio's data and config directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to the `_with_override()` functions
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`ICED_STUDIO_DATA_DIR`, `ICED_STUDIO_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs`, with the application name appended
//!
//! The history file lives in the data directory, `settings.toml` in the
//! config directory.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedStudio";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "ICED_STUDIO_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_STUDIO_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` and `--config-dir` CLI arguments.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    if !(data_set && config_set) {
        log::warn!("CLI directory overrides were already initialized");
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Data,
    Config,
}

impl Kind {
    fn cli(self) -> Option<PathBuf> {
        let cell = match self {
            Kind::Data => &CLI_DATA_DIR,
            Kind::Config => &CLI_CONFIG_DIR,
        };
        cell.get().and_then(Clone::clone)
    }

    fn env_var(self) -> &'static str {
        match self {
            Kind::Data => ENV_DATA_DIR,
            Kind::Config => ENV_CONFIG_DIR,
        }
    }

    fn platform(self) -> Option<PathBuf> {
        match self {
            Kind::Data => dirs::data_dir(),
            Kind::Config => dirs::config_dir(),
        }
    }
}

fn resolve(kind: Kind, override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = kind.cli() {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(kind.env_var()) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    kind.platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the directory holding persisted application state.
///
/// - Linux: `~/.local/share/IcedStudio/`
/// - macOS: `~/Library/Application Support/IcedStudio/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IcedStudio\`
///
/// Returns `None` if no platform directory can be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(Kind::Data, override_path)
}

/// Returns the directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(Kind::Config, override_path)
}
