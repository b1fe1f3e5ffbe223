//! File System Utilities
//!
//! Platform directory resolution for the launcher.

use crate::constants::{APP_DIR_NAME, BACKGROUND_DIR_NAME};
use crate::error::{Error, Result};
use crate::helpers::paths;
use directories::{BaseDirs, ProjectDirs};
use std::fs;
use std::path::{Path, PathBuf};

/// Get or create the controller's own configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/cultivation/` or `$XDG_CONFIG_HOME/cultivation/`
/// - **macOS**: `~/Library/Application Support/com.grasscutter.cultivation/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\grasscutter\cultivation\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let Some(project_dirs) = ProjectDirs::from("com", "grasscutter", "cultivation") else {
        return Err(Error::Invalid {
            message: "Could not determine project directories".to_string(),
        });
    };

    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// The host platform's application data directory
///
/// This is the shared root (e.g. `%APPDATA%` or `~/.local/share`), not a
/// launcher-specific folder; launcher files live under `cultivation/` inside it.
pub fn application_data_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| Error::Invalid {
            message: "Could not determine application data directory".to_string(),
        })
}

/// `<data>/cultivation`
pub fn launcher_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(APP_DIR_NAME)
}

/// Forward-slash form of `<data>/cultivation/bg`, as persisted in the record
pub fn background_dir(data_dir: &Path) -> String {
    let data_dir = paths::normalize(&data_dir.to_string_lossy());
    let launcher = paths::join(&data_dir, APP_DIR_NAME);
    paths::join(&launcher, BACKGROUND_DIR_NAME)
}

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_dir_uses_forward_slashes() {
        let dir = background_dir(Path::new("C:\\Users\\me\\AppData\\Roaming"));
        assert_eq!(dir, "C:/Users/me/AppData/Roaming/cultivation/bg");
    }

    #[test]
    fn test_background_dir_handles_trailing_separator() {
        let dir = background_dir(Path::new("/home/me/.local/share/"));
        assert_eq!(dir, "/home/me/.local/share/cultivation/bg");
    }
}
