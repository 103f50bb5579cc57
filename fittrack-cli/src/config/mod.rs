use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub charts: ChartsConfig,

    /// Where this config was loaded from; `save` writes back to it.
    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long the confirmation toast stays up
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,

    /// How long the error banner stays up
    #[serde(default = "default_error_seconds")]
    pub error_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_window_days")]
    pub frequency_window_days: i64,

    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_toast_seconds() -> u64 {
    3
}

fn default_error_seconds() -> u64 {
    5
}

fn default_window_days() -> i64 {
    30
}

fn default_weight_unit() -> String {
    "kg".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
            charts: ChartsConfig::default(),
            path: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_seconds: default_toast_seconds(),
            error_seconds: default_error_seconds(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            frequency_window_days: default_window_days(),
            weight_unit: default_weight_unit(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.fittrack/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".fittrack"))
    }

    /// Get config file path (~/.fittrack/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from an explicit file. A missing file yields defaults
    /// that will be saved to that same path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default_at(path));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Default settings that will be saved to `path`
    pub fn default_at(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            ..Self::default()
        }
    }

    /// Path this configuration is saved to
    pub fn path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::config_file(),
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_file = self.path()?;

        if let Some(dir) = config_file.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Log file used by the dashboard, next to the config file
    pub fn log_file(&self) -> Result<PathBuf> {
        let config_file = self.path()?;
        let dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(dir.join("fittrack.log"))
    }

    /// Check if a bearer token is stored
    pub fn is_authenticated(&self) -> bool {
        !self.auth.token.is_empty()
    }

    pub fn set_token(&mut self, token: String) {
        self.auth.token = token;
    }

    pub fn clear_token(&mut self) {
        self.auth.token.clear();
    }
}
