//! Configuration directory layout.
//!
//! All on-disk locations are derived from a single config root so tests
//! and the CLI can point the whole engine at an arbitrary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{KrError, Result};

/// Directory name under `~/.config` used by current releases.
pub const CONFIG_DIR_NAME: &str = "keyremap";

/// Directory name under `~/.config` used by releases before 1.3.0.
pub const LEGACY_CONFIG_DIR_NAME: &str = "key-remap";

/// Subdirectory of the config root holding per-group preset directories.
pub const PRESET_DIR_NAME: &str = "presets";

/// Locations of the configuration tree.
#[derive(Debug, Clone)]
pub struct ConfigDirs {
    root: PathBuf,
}

impl ConfigDirs {
    /// Use the standard per-user config root (`~/.config/keyremap`).
    pub fn discover() -> Result<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            KrError::ConfigInvalid("Could not determine config directory".to_string())
        })?;
        Ok(Self::at(base.join(CONFIG_DIR_NAME)))
    }

    /// Use an explicit config root.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The config root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/config.json`.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// The extensionless `<root>/config` written by releases before 0.4.0.
    pub fn legacy_config_file(&self) -> PathBuf {
        self.root.join("config")
    }

    /// `<root>/presets`.
    pub fn preset_dir(&self) -> PathBuf {
        self.root.join(PRESET_DIR_NAME)
    }

    /// `<root>/presets/<group>`.
    pub fn group_dir(&self, group: &str) -> PathBuf {
        self.preset_dir().join(group)
    }

    /// The sibling config root used by releases before 1.3.0
    /// (`~/.config/key-remap` next to `~/.config/keyremap`).
    pub fn legacy_root(&self) -> PathBuf {
        match self.root.parent() {
            Some(parent) => parent.join(LEGACY_CONFIG_DIR_NAME),
            None => PathBuf::from(LEGACY_CONFIG_DIR_NAME),
        }
    }
}

/// Create a directory and its parents, tolerating pre-existing ones.
pub fn mkdir(path: &Path) -> Result<()> {
    trace!(path = %path.display(), "Ensuring directory exists");
    fs::create_dir_all(path)?;
    Ok(())
}
