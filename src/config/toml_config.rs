use crate::config::{
    validate_provider, DEFAULT_ACCESS, DEFAULT_API_BASE_URL, DEFAULT_MIN_CONNECTORS,
    DEFAULT_OUTPUT_PATH, DEFAULT_RESOURCE, DEFAULT_STATE, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::{ConfigProvider, KeyDetection, ResponseFormat};
use crate::domain::services::connector_filter::DEFAULT_CONNECTOR_PATTERN;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_resource")]
    pub resource: String,
    #[serde(default)]
    pub format: ResponseFormat,
    pub api_key: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_access")]
    pub access: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_min_connectors")]
    pub min_connectors: i64,
    #[serde(default = "default_connector_field")]
    pub connector_field: String,
    #[serde(default)]
    pub key_detection: KeyDetection,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_connectors: default_min_connectors(),
            connector_field: default_connector_field(),
            key_detection: KeyDetection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_resource() -> String {
    DEFAULT_RESOURCE.to_string()
}

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

fn default_access() -> String {
    DEFAULT_ACCESS.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_min_connectors() -> i64 {
    DEFAULT_MIN_CONNECTORS
}

fn default_connector_field() -> String {
    DEFAULT_CONNECTOR_PATTERN.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl TomlConfig {
    /// Reads and parses a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text, substituting `${VAR}` placeholders first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left in place so validation can name them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.source.base_url
    }

    fn resource(&self) -> &str {
        &self.source.resource
    }

    fn response_format(&self) -> ResponseFormat {
        self.source.format
    }

    fn api_key(&self) -> &str {
        &self.source.api_key
    }

    fn state(&self) -> &str {
        &self.source.state
    }

    fn access(&self) -> &str {
        &self.source.access
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn min_connectors(&self) -> i64 {
        self.filter.min_connectors
    }

    fn connector_pattern(&self) -> &str {
        &self.filter.connector_field
    }

    fn key_detection(&self) -> KeyDetection {
        self.filter.key_detection
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
