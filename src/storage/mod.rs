pub mod config;
pub mod memory;
pub mod participants;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use config::{Config, ConfigStorage, GeneralConfig, TomlConfigStorage};
pub use memory::MemoryParticipantStore;
pub use participants::{ParticipantStore, SqliteParticipantStore, StoreError};

/// XDG data and config directories, resolved but not created
/// Returns (data_dir, config_dir)
///
/// XDG Base Directory Specification:
/// - Data: $XDG_DATA_HOME/exhibit (default: ~/.local/share/exhibit)
/// - Config: $XDG_CONFIG_HOME/exhibit (default: ~/.config/exhibit)
pub fn resolve_directories() -> Result<(PathBuf, PathBuf)> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(xdg_directories(
        Path::new(&home),
        env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
    ))
}

fn xdg_directories(
    home: &Path,
    xdg_data: Option<PathBuf>,
    xdg_config: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    let data_dir = match xdg_data {
        Some(dir) => dir.join("exhibit"),
        None => home.join(".local/share/exhibit"),
    };

    let config_dir = match xdg_config {
        Some(dir) => dir.join("exhibit"),
        None => home.join(".config/exhibit"),
    };

    (data_dir, config_dir)
}

/// Create a directory (and parents) if it is missing
pub fn ensure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {:?}", dir))?;
    log::debug!("Using directory {:?}", dir);
    Ok(())
}

/// Database file to open: command line, then config, then the data directory
/// Only the default location gets its directory created
pub fn database_location(
    override_path: Option<&Path>,
    config: &Config,
    data_dir: &Path,
) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if config.general.database_path.is_none() {
        ensure_directory(data_dir)?;
    }
    Ok(config.database_path(data_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xdg_directories_default_under_home() {
        let (data, config) = xdg_directories(Path::new("/home/staff"), None, None);
        assert_eq!(data, PathBuf::from("/home/staff/.local/share/exhibit"));
        assert_eq!(config, PathBuf::from("/home/staff/.config/exhibit"));
    }

    #[test]
    fn test_xdg_directories_follow_environment() {
        let (data, config) = xdg_directories(
            Path::new("/home/staff"),
            Some(PathBuf::from("/xdg/data")),
            Some(PathBuf::from("/xdg/config")),
        );
        assert_eq!(data, PathBuf::from("/xdg/data/exhibit"));
        assert_eq!(config, PathBuf::from("/xdg/config/exhibit"));
    }

    #[test]
    fn test_database_override_leaves_data_dir_alone() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let chosen = dir.path().join("expo.db");

        let path = database_location(Some(&chosen), &Config::default(), &data_dir).unwrap();
        assert_eq!(path, chosen);
        assert!(!data_dir.exists());

        let mut config = Config::default();
        config.general.database_path = Some(chosen.clone());
        let path = database_location(None, &config, &data_dir).unwrap();
        assert_eq!(path, chosen);
        assert!(!data_dir.exists());
    }

    #[test]
    fn test_default_database_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let path = database_location(None, &Config::default(), &data_dir).unwrap();
        assert_eq!(path, data_dir.join("exhibition.db"));
        assert!(data_dir.is_dir());
    }

    #[test]
    fn test_ensure_directory_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
