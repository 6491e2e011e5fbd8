//! Configuration management for Virtual Mustache.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for missing keys and cleanup of unknown sections on load
//!
//! # Example
//!
//! ```no_run
//! use mustache_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Catalog: {}", config.settings().catalog.base_url);
//!
//! config.settings_mut().capture.microphone_enabled = false;
//! config.update_section(ConfigSection::Capture).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    AssetSettings, CaptureSettings, CatalogSettings, ConfigSection, CoverSettings,
    LoggingSettings, Settings,
};
