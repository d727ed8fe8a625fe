use crate::config::{
    validate_provider, API_KEY_ENV, DEFAULT_ACCESS, DEFAULT_API_BASE_URL, DEFAULT_OUTPUT_PATH,
    DEFAULT_RESOURCE, DEFAULT_STATE,
};
use crate::core::{ConfigProvider, KeyDetection, ResponseFormat};
use crate::domain::services::connector_filter::DEFAULT_CONNECTOR_PATTERN;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Clone, Parser)]
#[command(name = "ev-etl")]
#[command(about = "Fetch EV charging stations and keep those with enough J3400 connectors")]
pub struct CliConfig {
    /// API key; falls back to the NREL_API_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value = DEFAULT_RESOURCE)]
    pub resource: String,

    /// Endpoint extension to request (csv or geojson)
    #[arg(long, default_value = "csv")]
    pub format: ResponseFormat,

    /// Jurisdiction filter, e.g. a two-letter state code
    #[arg(long, default_value = DEFAULT_STATE)]
    pub state: String,

    #[arg(long, default_value = DEFAULT_ACCESS)]
    pub access: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Keep stations with at least this many matching connectors
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub min_connectors: i64,

    /// Substring identifying the connector count property
    #[arg(long, default_value = DEFAULT_CONNECTOR_PATTERN)]
    pub connector_field: String,

    /// first-feature or any-feature
    #[arg(long, default_value = "first-feature")]
    pub key_detection: KeyDetection,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Show the request that would be made without sending it")]
    pub dry_run: bool,
}

impl CliConfig {
    /// Fills the API key from the environment when it was not passed on the command line.
    pub fn with_env_defaults(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
        self
    }
}

// The API key never shows up in debug output.
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url)
            .field("resource", &self.resource)
            .field("format", &self.format)
            .field("state", &self.state)
            .field("access", &self.access)
            .field("output_path", &self.output_path)
            .field("min_connectors", &self.min_connectors)
            .field("connector_field", &self.connector_field)
            .field("key_detection", &self.key_detection)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn resource(&self) -> &str {
        &self.resource
    }

    fn response_format(&self) -> ResponseFormat {
        self.format
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn state(&self) -> &str {
        &self.state
    }

    fn access(&self) -> &str {
        &self.access
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn min_connectors(&self) -> i64 {
        self.min_connectors
    }

    fn connector_pattern(&self) -> &str {
        &self.connector_field
    }

    fn key_detection(&self) -> KeyDetection {
        self.key_detection
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_required_field("api_key", &self.api_key)?;
        validate_provider(self)
    }
}
