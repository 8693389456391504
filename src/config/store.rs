//! The schema version recorded in `config.json`.

use std::fs;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::write_pretty_json;
use crate::error::Result;
use crate::paths::ConfigDirs;
use crate::version::ConfigVersion;

/// Typed view of the one config field this crate interprets; everything
/// else in `config.json` is opaque.
#[derive(Debug, Deserialize)]
struct ConfigHeader {
    version: Option<String>,
}

/// Reads and stamps the schema version in `config.json`.
#[derive(Debug, Clone)]
pub struct VersionStore {
    dirs: ConfigDirs,
}

impl VersionStore {
    pub fn new(dirs: &ConfigDirs) -> Self {
        Self { dirs: dirs.clone() }
    }

    /// The stored schema version.
    ///
    /// Never fails: a missing file, unreadable file, malformed JSON or
    /// absent `version` field all degrade to `0.0.0`, which makes every
    /// migration run. That is the safe direction for a fresh or foreign
    /// installation.
    pub fn read(&self) -> ConfigVersion {
        let path = self.dirs.config_file();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, assuming version 0.0.0");
            return ConfigVersion::ZERO;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read config file");
                return ConfigVersion::ZERO;
            }
        };

        match serde_json::from_str::<ConfigHeader>(&text) {
            Ok(ConfigHeader { version: Some(v) }) => ConfigVersion::parse(&v),
            Ok(ConfigHeader { version: None }) => ConfigVersion::ZERO,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not parse config file");
                ConfigVersion::ZERO
            }
        }
    }

    /// Stamp the config file with `version`.
    ///
    /// A store with no config file has nothing to stamp; that case is a
    /// silent no-op. An unparseable config is left untouched rather
    /// than clobbered.
    pub fn write(&self, version: ConfigVersion) -> Result<()> {
        let path = self.dirs.config_file();
        if !path.exists() {
            debug!(path = %path.display(), "No config file to stamp");
            return Ok(());
        }

        let text = fs::read_to_string(&path)?;
        let mut root: Value = match serde_json::from_str(&text) {
            Ok(Value::Object(map)) => Value::Object(map),
            Ok(_) | Err(_) => {
                warn!(path = %path.display(), "Config is not a JSON object, not stamping version");
                return Ok(());
            }
        };

        info!(path = %path.display(), version = %version, "Updating version in config");
        root["version"] = Value::String(version.to_string());
        write_pretty_json(&path, &root)
    }
}
