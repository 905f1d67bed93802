//! Converter configuration from md2notion.toml

use crate::client::{NotionClientConfig, DEFAULT_API_BASE_URL, DEFAULT_NOTION_VERSION};
use crate::pipeline::UpdateMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "md2notion.toml";

/// Environment variable holding the integration token
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Converter configuration from md2notion.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Notion integration token
    pub api_key: Option<String>,

    /// Default destination page
    pub page_id: Option<String>,

    /// Default update mode
    pub mode: UpdateMode,

    /// API base URL
    pub api_base_url: String,

    /// Value of the `Notion-Version` header
    pub notion_version: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            page_id: None,
            mode: UpdateMode::Replace,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a md2notion.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ConverterConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

        let config: ConverterConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a md2notion.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the file will be written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        fs::write(&path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// Pick the API key: command line flag, then environment, then file
    ///
    /// # Parameters
    /// * `flag` - Value of `--api-key`
    /// * `env` - Value of the `NOTION_API_KEY` environment variable
    pub fn resolve_api_key(&self, flag: Option<&str>, env: Option<&str>) -> Result<String, ConfigError> {
        flag.or(env)
            .or(self.api_key.as_deref())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Pick the destination page: command line flag, then file
    pub fn resolve_page_id(&self, flag: Option<&str>) -> Result<String, ConfigError> {
        flag.or(self.page_id.as_deref())
            .map(str::to_string)
            .ok_or(ConfigError::MissingPageId)
    }

    /// Client settings for the given API key
    pub fn client_config(&self, api_key: String) -> NotionClientConfig {
        NotionClientConfig {
            api_key,
            base_url: self.api_base_url.clone(),
            notion_version: self.notion_version.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Errors that can occur when loading, saving or resolving configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),

    /// No API key in flags, environment or file
    MissingApiKey,

    /// No destination page in flags or file
    MissingPageId,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
            ConfigError::MissingApiKey => write!(
                f,
                "No Notion API key: pass --api-key, set {} or add api_key to {}",
                API_KEY_ENV, CONFIG_FILE_NAME
            ),
            ConfigError::MissingPageId => write!(
                f,
                "No destination page: pass --page or add page_id to {}",
                CONFIG_FILE_NAME
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
