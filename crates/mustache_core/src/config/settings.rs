//! Settings struct with TOML-based sections.
//!
//! Each section maps to a TOML table and can be updated independently.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogLevel};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub capture: CaptureSettings,

    #[serde(default)]
    pub assets: AssetSettings,

    #[serde(default)]
    pub cover: CoverSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Remote video catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the catalog server, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:9527".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Screen recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Request microphone capture when recording starts.
    #[serde(default = "default_true")]
    pub microphone_enabled: bool,

    /// Folder the recorder saves finished clips into.
    #[serde(default = "default_recordings_folder")]
    pub recordings_folder: String,
}

fn default_true() -> bool {
    true
}

fn default_recordings_folder() -> String {
    "recordings".to_string()
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            microphone_enabled: true,
            recordings_folder: default_recordings_folder(),
        }
    }
}

/// Bundled style assets (models and preview images).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSettings {
    #[serde(default = "default_assets_root")]
    pub root: String,
}

fn default_assets_root() -> String {
    "assets".to_string()
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
        }
    }
}

/// Cover image rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverSettings {
    /// JPEG quality, 1-100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Canvas width; the preview's own width when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Canvas height; the preview's own height when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

fn default_jpeg_quality() -> u8 {
    80
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            width: None,
            height: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Number of recent lines replayed when a publish fails.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Write one log file per publish attempt.
    #[serde(default)]
    pub write_publish_logs: bool,

    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_error_tail() -> u32 {
    20
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            error_tail: default_error_tail(),
            write_publish_logs: false,
            logs_folder: default_logs_folder(),
        }
    }
}

impl LoggingSettings {
    /// Publish logger configuration derived from these settings.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            error_tail: self.error_tail as usize,
            show_timestamps: true,
        }
    }

    /// Directory for publish logs, when enabled.
    pub fn publish_log_dir(&self) -> Option<PathBuf> {
        self.write_publish_logs
            .then(|| PathBuf::from(&self.logs_folder))
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Catalog,
    Capture,
    Assets,
    Cover,
    Logging,
}

impl ConfigSection {
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Catalog,
        ConfigSection::Capture,
        ConfigSection::Assets,
        ConfigSection::Cover,
        ConfigSection::Logging,
    ];

    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Catalog => "catalog",
            ConfigSection::Capture => "capture",
            ConfigSection::Assets => "assets",
            ConfigSection::Cover => "cover",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment line written above the table.
    pub(crate) fn description(&self) -> &'static str {
        match self {
            ConfigSection::Catalog => "Remote video catalog",
            ConfigSection::Capture => "Screen recording",
            ConfigSection::Assets => "Style models and preview images",
            ConfigSection::Cover => "Cover image rendering",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
