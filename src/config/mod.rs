#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_API_BASE_URL: &str = "https://developer.nrel.gov";
pub const DEFAULT_RESOURCE: &str = "ev-charging-units";
pub const DEFAULT_STATE: &str = "WA";
pub const DEFAULT_ACCESS: &str = "public";
pub const DEFAULT_OUTPUT_PATH: &str = "ev_charging_units.geojson";
pub const DEFAULT_MIN_CONNECTORS: i64 = 1;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Environment variable consulted when no API key is given explicitly.
pub const API_KEY_ENV: &str = "NREL_API_KEY";

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_url("api_base_url", config.api_base_url())?;
    validation::validate_path_segment("resource", config.resource())?;

    validation::validate_non_empty_string("api_key", config.api_key())?;
    validation::validate_resolved("api_key", config.api_key())?;

    validation::validate_non_empty_string("state", config.state())?;
    validation::validate_non_empty_string("access", config.access())?;
    validation::validate_non_empty_string("connector_field", config.connector_pattern())?;

    validation::validate_path("output_path", config.output_path())?;
    validation::validate_resolved("output_path", config.output_path())?;

    validation::validate_range(
        "timeout_seconds",
        config.timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;

    Ok(())
}
