//! Configuration tree access.
//!
//! Handles the root `config.json` (version stamping) and the per-group
//! preset files. All other config content is opaque to this crate and
//! passes through untouched.

mod preset;
mod store;

pub use preset::{PresetFile, PresetRepository};
pub use store::VersionStore;

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Write a JSON document the way every config writer in this crate
/// does: pretty-printed with a trailing newline, so the files diff
/// cleanly under version control and hand editing.
pub(crate) fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| crate::error::KrError::ConfigInvalid(e.to_string()))?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_pretty_json_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        write_pretty_json(&path, &json!({"version": "1.0.0"})).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"version\": \"1.0.0\""));
    }
}
