//! Settings persistence as TOML under the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

pub struct SettingsService;

impl SettingsService {
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "club-scheduler")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable. Never fails: a broken config is logged and ignored.
    pub fn load() -> Settings {
        let Some(path) = Self::config_path() else {
            log::warn!("no config directory available; using default settings");
            return Settings::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("failed to load settings from {:?}: {:#}", path, err);
                Settings::default()
            }
        }
    }

    pub fn save(settings: &Settings) -> Result<()> {
        let path = Self::config_path().context("no config directory available")?;
        Self::save_to(settings, &path)
    }

    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {:?}", path))?;
        let settings: Settings = toml::from_str(&text).context("parsing settings TOML")?;
        Ok(settings.sanitized())
    }

    pub fn save_to(settings: &Settings, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {:?}", parent))?;
        }
        let text = toml::to_string_pretty(settings).context("serializing settings")?;
        fs::write(path, text).with_context(|| format!("writing settings file {:?}", path))?;
        Ok(())
    }
}
