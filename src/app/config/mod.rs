// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[generation]` - Default style and the simulated backend's behavior
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`/`save_with_override()`
//! 3. Otherwise [`paths`] resolves the config directory (CLI, environment,
//!    platform default)
//!
//! # Examples
//!
//! ```no_run
//! use iced_studio::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.generation.failure_rate = Some(0.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::generation::StyleTag;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// i18n key of the notice logged when `settings.toml` cannot be parsed.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Generation settings.
///
/// The latency and failure values shape the simulated backend; `seed`
/// makes its random draws reproducible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    /// Tag of the style preselected at startup.
    #[serde(
        default = "default_style_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_style: Option<String>,

    #[serde(
        default = "default_latency_min_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub latency_min_ms: Option<u64>,

    #[serde(
        default = "default_latency_max_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub latency_max_ms: Option<u64>,

    /// Probability (0.0 to 1.0) that an attempt reports an overload.
    #[serde(
        default = "default_failure_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub failure_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_style: default_style_tag(),
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            failure_rate: default_failure_rate(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Style tag preselected at startup. Unknown tags are kept as-is.
    #[must_use]
    pub fn default_style(&self) -> StyleTag {
        self.default_style
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map_or_else(StyleTag::default, StyleTag::new)
    }

    /// Simulated latency window `[min, max)` in milliseconds.
    ///
    /// Both bounds are capped at [`MAX_LATENCY_MS`]; a reversed window
    /// collapses to its lower bound.
    #[must_use]
    pub fn latency_window_ms(&self) -> (u64, u64) {
        let min = self
            .latency_min_ms
            .unwrap_or(DEFAULT_LATENCY_MIN_MS)
            .min(MAX_LATENCY_MS);
        let max = self
            .latency_max_ms
            .unwrap_or(DEFAULT_LATENCY_MAX_MS)
            .min(MAX_LATENCY_MS);
        (min, max.max(min))
    }

    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        match self.failure_rate {
            Some(rate) if rate.is_finite() => rate.clamp(MIN_FAILURE_RATE, MAX_FAILURE_RATE),
            _ => DEFAULT_FAILURE_RATE,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_style_tag() -> Option<String> {
    Some(DEFAULT_STYLE_TAG.to_string())
}

fn default_latency_min_ms() -> Option<u64> {
    Some(DEFAULT_LATENCY_MIN_MS)
}

fn default_latency_max_ms() -> Option<u64> {
    Some(DEFAULT_LATENCY_MAX_MS)
}

fn default_failure_rate() -> Option<f64> {
    Some(DEFAULT_FAILURE_RATE)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {other}"))),
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning_key). A missing file yields
/// the defaults silently; an unreadable one yields the defaults plus
/// [`CONFIG_LOAD_WARNING`].
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => {
            log::warn!("Ignoring unreadable {}: {err}", path.display());
            (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()))
        }
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
