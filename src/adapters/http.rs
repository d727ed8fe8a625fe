use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use url::Url;

pub const STATIONS_API_PATH: &str = "api/alt-fuel-stations/v1";

/// Full request URL including the `api_key`, `state` and `access` query.
pub fn stations_url<C: ConfigProvider + ?Sized>(config: &C) -> Result<Url> {
    build_url(config, config.api_key())
}

/// Same URL with the API key masked, for logs and dry runs.
pub fn redacted_stations_url<C: ConfigProvider + ?Sized>(config: &C) -> Result<Url> {
    build_url(config, "***")
}

fn build_url<C: ConfigProvider + ?Sized>(config: &C, api_key: &str) -> Result<Url> {
    let raw = format!(
        "{}/{}/{}.{}",
        config.api_base_url().trim_end_matches('/'),
        STATIONS_API_PATH,
        config.resource(),
        config.response_format().extension()
    );

    let mut url = Url::parse(&raw).map_err(|e| EtlError::InvalidConfigValueError {
        field: "api_base_url".to_string(),
        value: config.api_base_url().to_string(),
        reason: format!("cannot build request URL: {}", e),
    })?;

    url.query_pairs_mut()
        .append_pair("api_key", api_key)
        .append_pair("state", config.state())
        .append_pair("access", config.access());

    Ok(url)
}
