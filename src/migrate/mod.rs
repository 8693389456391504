//! Versioned migrations for the on-disk configuration.
//!
//! Each step is gated by "stored version < threshold" and therefore
//! runs at most once per installation; the whole sequence is safe to
//! run unconditionally at every application start. Steps execute in
//! ascending threshold order, and a later step may assume all earlier
//! ones already ran.

mod layout;
mod mapping_keys;
mod relocate;
mod target_annotation;

use tracing::info;

use crate::config::VersionStore;
use crate::error::Result;
use crate::paths::ConfigDirs;
use crate::symbols::SymbolTable;
use crate::targets::TargetRegistry;
use crate::version::{ConfigVersion, current_version};

/// 0.4.0 renamed the config file and nested preset directories.
const LAYOUT_THRESHOLD: ConfigVersion = ConfigVersion::new(0, 4, 0);
/// 1.2.2 added the event value to mapping keys.
const MAPPING_KEY_THRESHOLD: ConfigVersion = ConfigVersion::new(1, 2, 2);
/// 1.3.0 renamed the config root directory.
const RELOCATE_THRESHOLD: ConfigVersion = ConfigVersion::new(1, 3, 0);
/// 1.4.0 added the target device to mapping values.
const TARGET_THRESHOLD: ConfigVersion = ConfigVersion::new(1, 4, 0);

/// Runs the migration sequence against one configuration tree.
///
/// The target registry is an explicit dependency rather than ambient
/// state; tests can inject a custom one.
#[derive(Debug)]
pub struct Migrator {
    dirs: ConfigDirs,
    registry: TargetRegistry,
    symbols: SymbolTable,
}

impl Migrator {
    /// A migrator with the standard target registry and symbol table.
    pub fn new(dirs: ConfigDirs) -> Self {
        Self::with_registry(dirs, TargetRegistry::new(), SymbolTable::new())
    }

    /// A migrator with a caller-supplied registry and symbol table.
    pub fn with_registry(dirs: ConfigDirs, registry: TargetRegistry, symbols: SymbolTable) -> Self {
        Self {
            dirs,
            registry,
            symbols,
        }
    }

    /// Bring the configuration tree up to the current release.
    ///
    /// The gates below form the entire migration contract: a fixed,
    /// ordered, hand-maintained list. New steps are appended at the
    /// end with their release version as threshold.
    pub fn run(&mut self) -> Result<()> {
        let store = VersionStore::new(&self.dirs);
        let stored = store.read();
        let current = current_version();
        info!(stored = %stored, current = %current, "Running config migrations");

        if stored < LAYOUT_THRESHOLD {
            layout::config_suffix(&self.dirs)?;
            layout::nest_preset_dirs(&self.dirs)?;
        }

        if stored < MAPPING_KEY_THRESHOLD {
            mapping_keys::run(&self.dirs)?;
        }

        if stored < RELOCATE_THRESHOLD {
            relocate::run(&self.dirs)?;
        }

        if stored < TARGET_THRESHOLD {
            self.registry.prepare();
            target_annotation::run(&self.dirs, &self.registry, &self.symbols)?;
        }

        // New migrations are appended here.

        if stored < current {
            store.write(current)?;
        }
        Ok(())
    }
}

/// Run all pending migrations on a configuration tree.
///
/// The single entry point intended to be called once at startup,
/// before anything else reads the configuration.
pub fn migrate(dirs: ConfigDirs) -> Result<()> {
    Migrator::new(dirs).run()
}
