//! Target annotation for presets written before 1.4.0.
//!
//! Old mapping values were bare symbol strings; current values pair the
//! symbol with the virtual output device ("target") that emits it. An
//! entry that is already a pair is left alone, which is what makes the
//! step idempotent.

use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::config::PresetRepository;
use crate::error::Result;
use crate::paths::ConfigDirs;
use crate::symbols::SymbolTable;
use crate::targets::{BROKEN_MAPPING_NOTE, FALLBACK_TARGET, TargetRegistry, TargetResolver};

/// Rewrite every bare-symbol mapping value as a `[symbol, target]` pair.
///
/// The registry must be prepared before this runs; the orchestrator
/// does that. Per-entry resolution failures (unknown symbol, malformed
/// macro) leave that entry unmigrated and are not fatal.
pub fn run(dirs: &ConfigDirs, registry: &TargetRegistry, symbols: &SymbolTable) -> Result<()> {
    if !dirs.preset_dir().exists() {
        return Ok(());
    }

    let repo = PresetRepository::new(dirs);
    let resolver = TargetResolver::new(registry, symbols);

    for path in repo.all_presets()? {
        let mut preset = match repo.load(&path) {
            Ok(preset) => preset,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable preset");
                continue;
            }
        };

        let Some(mapping) = preset.mapping_mut() else {
            continue;
        };
        annotate_mapping(&path, mapping, &resolver);

        repo.save(&path, &preset)?;
    }
    Ok(())
}

fn annotate_mapping(path: &Path, mapping: &mut Map<String, Value>, resolver: &TargetResolver<'_>) {
    for (key, value) in mapping.iter_mut() {
        // Anything that is not a bare string was already migrated.
        let Some(symbol) = value.as_str() else {
            continue;
        };
        let mut symbol = symbol.to_string();

        let target = match resolver.resolve(&symbol) {
            Ok(Some(target)) => target.to_string(),
            Ok(None) => {
                symbol.push_str(BROKEN_MAPPING_NOTE);
                FALLBACK_TARGET.to_string()
            }
            Err(e) => {
                warn!(
                    preset = %path.display(),
                    key = %key,
                    error = %e,
                    "Leaving mapping entry unmigrated"
                );
                continue;
            }
        };

        info!(
            preset = %path.display(),
            key = %key,
            target = %target,
            "Assigning target for mapping"
        );
        *value = json!([symbol, target]);
    }
}
