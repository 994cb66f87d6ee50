//! Configuration management for deskmate-tools.
//!
//! Non-secret settings live in a TOML file stored in a platform-specific
//! location:
//!
//! - **macOS/Linux**: `~/.config/deskmate-tools/config.toml`
//! - **Windows**: `%APPDATA%\deskmate-tools\config.toml`
//!
//! API tokens are never written to that file. They are read from the
//! environment through [`Credentials`].
//!
//! # Example
//!
//! ```ignore
//! use deskmate_core::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("monday.board_limit", "25")?;
//! config.save()?;
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "deskmate-tools";

/// Environment variable holding the monday.com API token.
pub const MONDAY_TOKEN_ENV: &str = "MONDAY_API_TOKEN";

/// Environment variable holding the WeatherStack access key.
pub const WEATHER_KEY_ENV: &str = "WEATHERSTACK_API_KEY";

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// monday.com configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<MondayConfig>,

    /// Weather lookup configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherConfig>,
}

/// monday.com provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MondayConfig {
    /// GraphQL endpoint
    #[serde(default = "default_monday_url")]
    pub api_url: String,
    /// Value of the `API-Version` header (e.g., "2024-10")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Default page size for board listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_limit: Option<u32>,
}

impl Default for MondayConfig {
    fn default() -> Self {
        Self {
            api_url: default_monday_url(),
            api_version: None,
            board_limit: None,
        }
    }
}

/// WeatherStack provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the current-weather API
    #[serde(default = "default_weather_url")]
    pub api_url: String,
    /// Unit system: `m` (metric), `f` (fahrenheit) or `s` (scientific)
    #[serde(default = "default_units")]
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_weather_url(),
            units: default_units(),
        }
    }
}

fn default_monday_url() -> String {
    "https://api.monday.com/v2".to_string()
}

fn default_weather_url() -> String {
    "http://api.weatherstack.com".to_string()
}

fn default_units() -> String {
    "m".to_string()
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Get the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        debug!(path = ?path, "Loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        info!(path = ?path, "Config loaded successfully");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        debug!(path = ?path, "Saving config");

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        info!(path = ?path, "Config saved successfully");
        Ok(())
    }

    /// monday.com settings, falling back to defaults.
    pub fn monday_or_default(&self) -> MondayConfig {
        self.monday.clone().unwrap_or_default()
    }

    /// Weather settings, falling back to defaults.
    pub fn weather_or_default(&self) -> WeatherConfig {
        self.weather.clone().unwrap_or_default()
    }

    /// Set a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `monday.api_url`, `weather.units`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = split_key(key)?;

        match section {
            "monday" => {
                let config = self.monday.get_or_insert_with(MondayConfig::default);
                match field {
                    "api_url" | "url" => config.api_url = value.to_string(),
                    "api_version" | "version" => config.api_version = Some(value.to_string()),
                    "board_limit" => {
                        let limit = value.parse::<u32>().map_err(|_| {
                            Error::Config(format!(
                                "Invalid value for monday.board_limit: '{}'",
                                value
                            ))
                        })?;
                        config.board_limit = Some(limit);
                    }
                    _ => {
                        return Err(Error::Config(format!(
                            "Unknown monday config field: {}",
                            field
                        )))
                    }
                }
            }
            "weather" => {
                let config = self.weather.get_or_insert_with(WeatherConfig::default);
                match field {
                    "api_url" | "url" => config.api_url = value.to_string(),
                    "units" => match value {
                        "m" | "f" | "s" => config.units = value.to_string(),
                        _ => {
                            return Err(Error::Config(format!(
                                "Invalid value for weather.units: '{}' (expected m, f or s)",
                                value
                            )))
                        }
                    },
                    _ => {
                        return Err(Error::Config(format!(
                            "Unknown weather config field: {}",
                            field
                        )))
                    }
                }
            }
            _ => {
                return Err(Error::Config(format!("Unknown section: {}", section)));
            }
        }

        Ok(())
    }

    /// Get a configuration value by key path.
    ///
    /// Key format: `section.field` (e.g., `monday.api_url`, `weather.units`)
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let (section, field) = split_key(key)?;

        match section {
            "monday" => {
                let Some(config) = &self.monday else {
                    return Ok(None);
                };
                match field {
                    "api_url" | "url" => Ok(Some(config.api_url.clone())),
                    "api_version" | "version" => Ok(config.api_version.clone()),
                    "board_limit" => Ok(config.board_limit.map(|l| l.to_string())),
                    _ => Err(Error::Config(format!(
                        "Unknown monday config field: {}",
                        field
                    ))),
                }
            }
            "weather" => {
                let Some(config) = &self.weather else {
                    return Ok(None);
                };
                match field {
                    "api_url" | "url" => Ok(Some(config.api_url.clone())),
                    "units" => Ok(Some(config.units.clone())),
                    _ => Err(Error::Config(format!(
                        "Unknown weather config field: {}",
                        field
                    ))),
                }
            }
            _ => Err(Error::Config(format!("Unknown section: {}", section))),
        }
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.len() != 2 {
        return Err(Error::Config(format!(
            "Invalid config key '{}'. Expected format: section.field",
            key
        )));
    }
    Ok((parts[0], parts[1]))
}

// =============================================================================
// Credentials
// =============================================================================

/// Secrets read from the process environment.
#[derive(Clone, Default)]
pub struct Credentials {
    pub monday_token: Option<String>,
    pub weather_key: Option<String>,
}

impl Credentials {
    /// Read credentials from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup function.
    ///
    /// Blank values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            monday_token: read(MONDAY_TOKEN_ENV),
            weather_key: read(WEATHER_KEY_ENV),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hidden = |v: &Option<String>| v.as_ref().map(|_| "<hidden>");
        f.debug_struct("Credentials")
            .field("monday_token", &hidden(&self.monday_token))
            .field("weather_key", &hidden(&self.weather_key))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.monday.is_none());
        assert!(config.weather.is_none());
        assert_eq!(config.monday_or_default().api_url, "https://api.monday.com/v2");
        assert_eq!(config.weather_or_default().units, "m");
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();

        config.set("monday.api_version", "2024-10").unwrap();
        config.set("monday.board_limit", "25").unwrap();

        assert_eq!(
            config.get("monday.api_version").unwrap(),
            Some("2024-10".to_string())
        );
        assert_eq!(
            config.get("monday.board_limit").unwrap(),
            Some("25".to_string())
        );
        // Untouched field keeps its default
        assert_eq!(
            config.get("monday.api_url").unwrap(),
            Some("https://api.monday.com/v2".to_string())
        );

        config.set("weather.units", "f").unwrap();
        assert_eq!(config.get("weather.units").unwrap(), Some("f".to_string()));
    }

    #[test]
    fn test_invalid_key() {
        let mut config = Config::default();

        assert!(config.set("invalid", "value").is_err());
        assert!(config.set("too.many.parts", "value").is_err());
        assert!(config.set("unknown.field", "value").is_err());

        // When section doesn't exist, get returns Ok(None)
        assert_eq!(config.get("monday.api_url").unwrap(), None);

        config.set("monday.api_url", "http://localhost").unwrap();
        assert!(config.get("monday.unknown_field").is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("monday.board_limit", "many").is_err());
        assert!(config.set("weather.units", "kelvin").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let mut config = Config::default();
        config.monday = Some(MondayConfig {
            api_url: "https://monday.example.com/v2".to_string(),
            api_version: Some("2024-10".to_string()),
            board_limit: None,
        });

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[monday]"));
        assert!(contents.contains("api_version = \"2024-10\""));
        assert!(!contents.contains("board_limit"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_nonexistent() {
        let path = PathBuf::from("/nonexistent/path/config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(config.monday.is_none());
    }

    #[test]
    fn test_load_partial_section_uses_defaults() {
        let parsed: Config = toml::from_str("[weather]\nunits = \"s\"\n").unwrap();
        let weather = parsed.weather.unwrap();
        assert_eq!(weather.units, "s");
        assert_eq!(weather.api_url, "http://api.weatherstack.com");
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = Credentials::from_lookup(|name| match name {
            MONDAY_TOKEN_ENV => Some("tok".to_string()),
            WEATHER_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(creds.monday_token.as_deref(), Some("tok"));
        assert!(creds.weather_key.is_none());
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let creds = Credentials {
            monday_token: Some("secret-token".to_string()),
            weather_key: None,
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<hidden>"));
    }
}
