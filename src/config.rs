use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::constants::{
    API_KEY_ENV, CONFIG_PATH_ENV, DEFAULT_BACKGROUND_COLOR, DEFAULT_CONFIG_PATH,
    DEFAULT_DIRECTORY_URL, DEFAULT_LOCATION, DEFAULT_MAP_STYLE, DEFAULT_MAP_ZOOM, DEFAULT_PORT,
    DEFAULT_RESULTS_KEY, DEFAULT_SEARCH_PATH, DEFAULT_TIMEOUT_SECONDS, MAP_TOKEN_ENV,
};
use crate::error::{MeetupError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub directory: DirectoryConfig,
    pub map: MapConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub search_path: String,
    pub timeout_seconds: u64,
    pub results_key: String,
    /// Filled from the environment, never from the file
    #[serde(skip)]
    pub api_key: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTORY_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            results_key: DEFAULT_RESULTS_KEY.to_string(),
            api_key: String::new(),
        }
    }
}

impl DirectoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.search_path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub style: String,
    pub zoom: u32,
    pub pad: u32,
    pub background_color: String,
    #[serde(skip)]
    pub access_token: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: DEFAULT_MAP_STYLE.to_string(),
            zoom: DEFAULT_MAP_ZOOM,
            pad: 0,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            access_token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub default_location: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl Config {
    /// Loads `config.toml` (or the file named by `MEETUP_MAP_CONFIG`) and the
    /// credentials from the environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(&config_path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Missing file means defaults; an unreadable or invalid one is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file '{}' not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(path).map_err(|e| {
            MeetupError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.directory.api_key = key;
        }
        if let Ok(token) = std::env::var(MAP_TOKEN_ENV) {
            self.map.access_token = token;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.directory.timeout_seconds == 0 {
            return Err(MeetupError::Config(
                "directory.timeout_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Searching the directory needs a key; only the commands that search
    /// call this.
    pub fn require_api_key(&self) -> Result<&str> {
        let key = self.directory.api_key.trim();
        if key.is_empty() {
            return Err(MeetupError::Config(format!("{API_KEY_ENV} is not set")));
        }
        Ok(key)
    }
}
