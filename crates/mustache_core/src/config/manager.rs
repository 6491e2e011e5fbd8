//! Config manager for loading, saving, and atomic updates.
//!
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only the modified section is changed)
//! - Unknown sections are dropped on load
//! - Comments elsewhere in the file survive section updates (`toml_edit`)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Loads, saves and updates the settings file.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Create a manager for `config_path`. Nothing is read until `load()` or
    /// `load_or_create()`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Platform config location, e.g. `~/.config/virtualmustache/settings.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "yuzai", "VirtualMustache")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// In-memory only until `save()` or `update_section()`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file. Fails if the file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, creating it with defaults if missing.
    ///
    /// Rewrites the file when defaults had to be filled in or unknown
    /// sections were found.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = parse_and_clean(&content)?;
            self.settings = settings;

            if was_modified {
                tracing::debug!(
                    path = %self.config_path.display(),
                    "Rewriting config with defaults"
                );
                self.save()?;
            }
        } else {
            tracing::info!(path = %self.config_path.display(), "Creating default config");
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Create the recordings, assets and (if enabled) logs folders.
    pub fn ensure_dirs_exist(&self) -> ConfigResult<()> {
        let mut dirs = vec![self.recordings_folder(), self.assets_root()];
        if let Some(logs) = self.settings.logging.publish_log_dir() {
            dirs.push(logs);
        }

        for dir in dirs {
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }

    pub fn recordings_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.capture.recordings_folder)
    }

    pub fn assets_root(&self) -> PathBuf {
        PathBuf::from(&self.settings.assets.root)
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Rewrite one section on disk, leaving the rest of the file as it is.
    ///
    /// The file is re-read first so edits made elsewhere are not clobbered.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_doc: DocumentMut = self.section_toml(section)?.parse()?;
        doc[section.table_name()] = Item::Table(section_doc.as_table().clone());

        self.atomic_write(&doc.to_string())?;
        tracing::debug!(section = section.table_name(), "Config section updated");
        Ok(())
    }

    fn section_toml(&self, section: ConfigSection) -> ConfigResult<String> {
        let content = match section {
            ConfigSection::Catalog => toml::to_string_pretty(&self.settings.catalog)?,
            ConfigSection::Capture => toml::to_string_pretty(&self.settings.capture)?,
            ConfigSection::Assets => toml::to_string_pretty(&self.settings.assets)?,
            ConfigSection::Cover => toml::to_string_pretty(&self.settings.cover)?,
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
        };
        Ok(content)
    }

    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();
        output.push_str("# Virtual Mustache Configuration\n");
        output.push_str(
            "# This file is auto-generated. Comments may be preserved on section updates.\n",
        );

        for section in ConfigSection::ALL {
            output.push('\n');
            output.push_str(&format!("# {}\n", section.description()));
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in self.section_toml(section)?.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)
    }
}

/// Parse settings and report whether the file needs rewriting.
fn parse_and_clean(content: &str) -> ConfigResult<(Settings, bool)> {
    let doc: DocumentMut = content.parse()?;
    let settings: Settings = toml::from_str(content)?;

    let has_unknown = doc.iter().any(|(key, _)| {
        !ConfigSection::ALL
            .iter()
            .any(|section| section.table_name() == key)
    });

    // A section-by-section comparison ignores comments and table order.
    let reserialized: DocumentMut = toml::to_string_pretty(&settings)?.parse()?;
    let missing_defaults = ConfigSection::ALL.iter().any(|section| {
        let name = section.table_name();
        match (doc.get(name), reserialized.get(name)) {
            (Some(Item::Table(on_disk)), Some(Item::Table(expected))) => {
                on_disk.len() != expected.len()
            }
            (None, Some(_)) => true,
            _ => false,
        }
    });

    Ok((settings, has_unknown || missing_defaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[catalog]"));
        assert!(content.contains("[cover]"));
        assert!(content.contains("# Screen recording"));

        // The generated file must load cleanly.
        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.settings().cover.jpeg_quality, 80);
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[catalog]\nbase_url = \"http://videos.local:9527\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(
            manager.settings().catalog.base_url,
            "http://videos.local:9527"
        );
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(
            content.contains("[capture]"),
            "missing sections are filled in"
        );
    }

    #[test]
    fn load_or_create_drops_unknown_sections() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(&config_path, "[legacy]\nfoo = 1\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(!content.contains("[legacy]"));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn update_section_only_changes_target() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        manager.settings_mut().capture.microphone_enabled = false;
        manager.settings_mut().catalog.base_url = "http://not-saved".to_string();
        manager.update_section(ConfigSection::Capture).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("microphone_enabled = false"));
        assert!(!content.contains("not-saved"));
        assert!(content.contains("# Virtual Mustache Configuration"));
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(!config_path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn ensure_dirs_creates_folders() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("settings.toml"));
        let recordings = dir.path().join("clips");
        let assets = dir.path().join("assets");
        manager.settings_mut().capture.recordings_folder = recordings.display().to_string();
        manager.settings_mut().assets.root = assets.display().to_string();

        manager.ensure_dirs_exist().unwrap();

        assert!(recordings.is_dir());
        assert!(assets.is_dir());
    }
}
