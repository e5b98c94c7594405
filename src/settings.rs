use crate::export::ExportFormat;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const EXPORT_DIR_VAR: &str = "RESPACK_EXPORT_DIR";
pub const EXPORT_FORMAT_VAR: &str = "RESPACK_EXPORT_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export_dir: PathBuf,
    pub export_format: ExportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("icons"),
            export_format: ExportFormat::default(),
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("respack").join("settings.json"))
    }

    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {e}");
        }

        let mut settings = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Reads a settings file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = serde_json::from_slice(&content)
            .with_context(|| format!("failed to parse settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Applies overrides looked up through `lookup`, normally the process env.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(EXPORT_DIR_VAR).filter(|v| !v.is_empty()) {
            self.export_dir = PathBuf::from(dir);
        }
        if let Some(format) = lookup(EXPORT_FORMAT_VAR).filter(|v| !v.is_empty()) {
            self.export_format = format
                .parse()
                .with_context(|| format!("invalid {EXPORT_FORMAT_VAR}"))?;
        }
        Ok(())
    }
}
