//! Preset file access.
//!
//! One preset is one JSON file inside a per-group directory under
//! `presets/`. Only the `"mapping"` object is interpreted; all other
//! fields pass through untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::write_pretty_json;
use crate::error::{KrError, Result};
use crate::paths::ConfigDirs;

/// A loaded preset document.
///
/// The mapping table keeps file order (`serde_json` with
/// `preserve_order`), so rewriting a preset does not shuffle entries.
#[derive(Debug, Clone)]
pub struct PresetFile {
    root: Map<String, Value>,
}

impl PresetFile {
    /// The `"mapping"` table, if the preset has one.
    pub fn mapping(&self) -> Option<&Map<String, Value>> {
        self.root.get("mapping").and_then(Value::as_object)
    }

    /// Mutable access to the `"mapping"` table.
    pub fn mapping_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.root.get_mut("mapping").and_then(Value::as_object_mut)
    }
}

/// Enumerates, loads and saves preset files.
#[derive(Debug, Clone)]
pub struct PresetRepository {
    dirs: ConfigDirs,
}

impl PresetRepository {
    pub fn new(dirs: &ConfigDirs) -> Self {
        Self { dirs: dirs.clone() }
    }

    /// Every `*.json` preset across all group directories, sorted for
    /// deterministic processing order. Empty when `presets/` does not
    /// exist.
    pub fn all_presets(&self) -> Result<Vec<PathBuf>> {
        let preset_dir = self.dirs.preset_dir();
        if !preset_dir.exists() {
            return Ok(Vec::new());
        }

        let mut presets = Vec::new();
        for group in fs::read_dir(&preset_dir)? {
            let group = group?;
            if !group.file_type()?.is_dir() {
                continue;
            }
            for entry in fs::read_dir(group.path())? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    presets.push(path);
                }
            }
        }
        presets.sort();
        trace!(count = presets.len(), "Enumerated preset files");
        Ok(presets)
    }

    /// Load one preset file.
    ///
    /// Any read or parse failure is an error; migration steps log it
    /// and skip the file rather than aborting the run.
    pub fn load(&self, path: &Path) -> Result<PresetFile> {
        let text =
            fs::read_to_string(path).map_err(|e| KrError::preset_parse(path, e.to_string()))?;
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(root)) => Ok(PresetFile { root }),
            Ok(_) => Err(KrError::preset_parse(path, "not a JSON object")),
            Err(e) => Err(KrError::preset_parse(path, e.to_string())),
        }
    }

    /// Rewrite a preset file, pretty-printed with a trailing newline.
    pub fn save(&self, path: &Path, preset: &PresetFile) -> Result<()> {
        trace!(path = %path.display(), "Writing preset");
        write_pretty_json(path, &preset.root)
    }
}
