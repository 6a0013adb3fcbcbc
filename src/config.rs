use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_NOTIFICATION_MS: u64 = 5000;

/// Environment variable that overrides `server.base_url`
pub const BASE_URL_ENV: &str = "METER_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// API root; the meters resource lives at `<base_url>/meters`
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a notification stays before auto-dismissing
    pub notification_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_ms: DEFAULT_NOTIFICATION_MS,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir().ok_or_else(|| eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join("meter-registry-tui");

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir.join("config.toml"))
    }

    /// Load the config file (writing defaults on first run), apply the
    /// environment override and validate the result
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config
            .with_base_url_override(std::env::var(BASE_URL_ENV).ok())
            .validated()
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;
        Ok(())
    }

    /// Replace the base URL when an override is set and non-blank
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.map(|u| u.trim().to_string()) {
            if !url.is_empty() {
                self.server.base_url = url;
            }
        }
        self
    }

    pub fn validated(self) -> Result<Self> {
        validate_url(&self.server.base_url)
            .map_err(|e| eyre!("Invalid base_url {:?}: {e}", self.server.base_url))?;
        Ok(self)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.ui.notification_ms)
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    url::Url::parse(url).map_err(|e| format!("Invalid URL format: {e}"))?;

    Ok(())
}
