//! Mapping-key normalization for presets written before 1.2.2.
//!
//! Old mapping keys were `"type,code"` pairs; current keys carry the
//! event value too: `"type,code,value"`. Two-field keys get a default
//! value of `1` (key press) appended.

use tracing::{debug, warn};

use crate::config::PresetRepository;
use crate::error::Result;
use crate::paths::ConfigDirs;

/// Append the default value to every legacy 2-field mapping key.
///
/// Every preset is rewritten, changed or not; the version gate makes
/// this a one-time cost per installation.
pub fn run(dirs: &ConfigDirs) -> Result<()> {
    let repo = PresetRepository::new(dirs);
    for path in repo.all_presets()? {
        let mut preset = match repo.load(&path) {
            Ok(preset) => preset,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable preset");
                continue;
            }
        };

        if let Some(mapping) = preset.mapping_mut() {
            let legacy: Vec<String> = mapping
                .keys()
                .filter(|key| key.matches(',').count() == 1)
                .cloned()
                .collect();
            for key in legacy {
                if let Some(value) = mapping.shift_remove(&key) {
                    debug!(preset = %path.display(), key = %key, "Normalizing mapping key");
                    mapping.insert(format!("{key},1"), value);
                }
            }
        }

        repo.save(&path, &preset)?;
    }
    Ok(())
}
