//! Filesystem layout fixes for configs written before 0.4.0.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::paths::{ConfigDirs, mkdir};

/// Rename the extensionless legacy `config` file to `config.json`.
///
/// Runs only when exactly the legacy file exists; with both or neither
/// present there is nothing to do.
pub fn config_suffix(dirs: &ConfigDirs) -> Result<()> {
    let deprecated = dirs.legacy_config_file();
    let current = dirs.config_file();
    if deprecated.exists() && !current.exists() {
        info!(
            from = %deprecated.display(),
            to = %current.display(),
            "Renaming legacy config file"
        );
        fs::rename(&deprecated, &current)?;
    }
    Ok(())
}

/// Move flat per-group preset directories under `presets/`.
///
/// Before 0.4.0 each device group had its directory directly under the
/// config root. No-op when `presets/` already exists or the config root
/// is absent.
pub fn nest_preset_dirs(dirs: &ConfigDirs) -> Result<()> {
    let preset_dir = dirs.preset_dir();
    if preset_dir.exists() || !dirs.root().exists() {
        return Ok(());
    }

    info!("Migrating preset directory layout from < 0.4.0");

    // Snapshot the group directories before creating presets/, so the
    // new directory is not swept up in the move.
    let groups: Vec<PathBuf> = fs::read_dir(dirs.root())?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| entry.path())
        .collect();

    mkdir(&preset_dir)?;
    for group in groups {
        if let Some(name) = group.file_name() {
            let target = preset_dir.join(name);
            info!(from = %group.display(), to = %target.display(), "Moving preset group");
            fs::rename(&group, &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dirs_in(temp: &TempDir) -> ConfigDirs {
        ConfigDirs::at(temp.path().join("keyremap"))
    }

    #[test]
    fn test_config_suffix_renames() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(dirs.root()).unwrap();
        fs::write(dirs.legacy_config_file(), "{}\n").unwrap();

        config_suffix(&dirs).unwrap();

        assert!(!dirs.legacy_config_file().exists());
        assert_eq!(fs::read_to_string(dirs.config_file()).unwrap(), "{}\n");
    }

    #[test]
    fn test_config_suffix_keeps_existing_json() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(dirs.root()).unwrap();
        fs::write(dirs.legacy_config_file(), "old").unwrap();
        fs::write(dirs.config_file(), "new").unwrap();

        config_suffix(&dirs).unwrap();

        // Both untouched: the json file wins and the legacy one stays.
        assert_eq!(fs::read_to_string(dirs.legacy_config_file()).unwrap(), "old");
        assert_eq!(fs::read_to_string(dirs.config_file()).unwrap(), "new");
    }

    #[test]
    fn test_config_suffix_no_files() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        config_suffix(&dirs).unwrap();
        assert!(!dirs.config_file().exists());
    }

    #[test]
    fn test_nest_preset_dirs_moves_groups() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(dirs.root().join("Logitech K850")).unwrap();
        fs::create_dir_all(dirs.root().join("AT Keyboard")).unwrap();
        fs::write(dirs.root().join("Logitech K850").join("p.json"), "{}").unwrap();
        fs::write(dirs.config_file(), "{}").unwrap();

        nest_preset_dirs(&dirs).unwrap();

        assert!(dirs.group_dir("Logitech K850").join("p.json").exists());
        assert!(dirs.group_dir("AT Keyboard").exists());
        assert!(!dirs.root().join("Logitech K850").exists());
        // Plain files at the root stay put.
        assert!(dirs.config_file().exists());
    }

    #[test]
    fn test_nest_preset_dirs_noop_when_nested() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(dirs.group_dir("Existing")).unwrap();
        fs::create_dir_all(dirs.root().join("Unrelated")).unwrap();

        nest_preset_dirs(&dirs).unwrap();

        // presets/ already existed, so nothing moved.
        assert!(dirs.root().join("Unrelated").exists());
        assert!(!dirs.group_dir("Unrelated").exists());
    }

    #[test]
    fn test_nest_preset_dirs_missing_root() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        nest_preset_dirs(&dirs).unwrap();
        assert!(!dirs.preset_dir().exists());
    }
}
