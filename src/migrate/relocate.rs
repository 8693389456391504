//! Config root relocation for installations older than 1.3.0.
//!
//! Early releases stored everything under `~/.config/key-remap`; the
//! whole tree moves to the current root.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::paths::ConfigDirs;

/// Move the legacy config root to the current location.
///
/// No-op when the current root already exists (migrated, or a fresh
/// install already wrote config there) or the legacy root is absent.
pub fn run(dirs: &ConfigDirs) -> Result<()> {
    let legacy = dirs.legacy_root();
    if dirs.root().exists() || !legacy.exists() {
        return Ok(());
    }

    info!(
        from = %legacy.display(),
        to = %dirs.root().display(),
        "Relocating legacy config directory"
    );

    // rename() fails across filesystems; fall back to copy + remove.
    if fs::rename(&legacy, dirs.root()).is_err() {
        copy_tree(&legacy, dirs.root())?;
        fs::remove_dir_all(&legacy)?;
    }
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
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
    fn test_moves_legacy_tree() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        let legacy = dirs.legacy_root();
        fs::create_dir_all(legacy.join("presets/Device")).unwrap();
        fs::write(legacy.join("config.json"), "{}").unwrap();
        fs::write(legacy.join("presets/Device/p.json"), "{}").unwrap();

        run(&dirs).unwrap();

        assert!(!legacy.exists());
        assert!(dirs.config_file().exists());
        assert!(dirs.group_dir("Device").join("p.json").exists());
    }

    #[test]
    fn test_noop_when_current_exists() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(dirs.root()).unwrap();
        fs::write(dirs.config_file(), "current").unwrap();
        let legacy = dirs.legacy_root();
        fs::create_dir_all(&legacy).unwrap();
        fs::write(legacy.join("config.json"), "legacy").unwrap();

        run(&dirs).unwrap();

        // Both trees untouched.
        assert_eq!(fs::read_to_string(dirs.config_file()).unwrap(), "current");
        assert_eq!(
            fs::read_to_string(legacy.join("config.json")).unwrap(),
            "legacy"
        );
    }

    #[test]
    fn test_noop_on_fresh_install() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        run(&dirs).unwrap();
        assert!(!dirs.root().exists());
    }

    #[test]
    fn test_copy_tree_deep() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("from");
        let to = temp.path().join("to");
        fs::create_dir_all(from.join("a/b")).unwrap();
        fs::write(from.join("a/b/file.json"), "x").unwrap();

        copy_tree(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(to.join("a/b/file.json")).unwrap(), "x");
    }
}
