use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default database file name inside the data directory
pub const DEFAULT_DATABASE_FILE: &str = "exhibition.db";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Resolve the database file, falling back to the data directory
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        match &self.general.database_path {
            Some(path) => path.clone(),
            None => data_dir.join(DEFAULT_DATABASE_FILE),
        }
    }
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Database file (defaults to <data_dir>/exhibition.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Minimum level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Minimum level shown in the status bar
    #[serde(default = "default_flash_level")]
    pub flash_level: String,

    /// How long status bar messages stay visible
    #[serde(default = "default_flash_message_duration_ms")]
    pub flash_message_duration_ms: u64,

    /// Ask before deleting a record
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,

    /// Built-in colour theme (mocha or latte)
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            database_path: None,
            log_level: default_log_level(),
            flash_level: default_flash_level(),
            flash_message_duration_ms: default_flash_message_duration_ms(),
            confirm_delete: default_confirm_delete(),
            theme: default_theme(),
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}

fn default_flash_level() -> String {
    "warn".to_string()
}

fn default_flash_message_duration_ms() -> u64 {
    4000
}

fn default_confirm_delete() -> bool {
    true
}

fn default_theme() -> String {
    "mocha".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        use anyhow::Context;
        use std::fs;

        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: database_path={:?}, log_level={}, confirm_delete={}",
            config.general.database_path,
            config.general.log_level,
            config.general.confirm_delete
        );

        Ok(config)
    }

    fn create_default(&self) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Example config compiled into the binary
        let example_config = include_str!("../../exhibit.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}
