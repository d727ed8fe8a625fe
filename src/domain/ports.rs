use crate::domain::model::{Payload, TransformResult};
use crate::domain::services::connector_filter::KeyDetection;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Endpoint extension requested from the stations API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Csv,
    Geojson,
}

impl ResponseFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ResponseFormat::Csv => "csv",
            ResponseFormat::Geojson => "geojson",
        }
    }
}

impl std::str::FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ResponseFormat::Csv),
            "geojson" => Ok(ResponseFormat::Geojson),
            other => Err(format!("unknown response format '{other}' (expected csv or geojson)")),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn resource(&self) -> &str;
    fn response_format(&self) -> ResponseFormat;
    fn api_key(&self) -> &str;
    fn state(&self) -> &str;
    fn access(&self) -> &str;
    fn output_path(&self) -> &str;
    fn min_connectors(&self) -> i64;
    fn connector_pattern(&self) -> &str;
    fn key_detection(&self) -> KeyDetection;
    fn timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Payload>;
    async fn transform(&self, payload: Payload) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
