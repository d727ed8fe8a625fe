use crate::adapters::http;
use crate::core::{ConfigProvider, Payload, PayloadKind, Pipeline, Storage, TransformResult};
use crate::domain::services::{csv_to_feature_collection, sniff, ConnectorFilter};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// Fetches one batch of stations, normalizes it to GeoJSON and filters it by
/// connector count.
pub struct StationPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> StationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    fn connector_filter(&self) -> ConnectorFilter {
        ConnectorFilter::new(self.config.connector_pattern())
            .with_detection(self.config.key_detection())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StationPipeline<S, C> {
    async fn extract(&self) -> Result<Payload> {
        let url = http::stations_url(&self.config)?;

        tracing::info!(
            "Requesting EV charging data for state={} ...",
            self.config.state()
        );
        tracing::debug!(
            "Making API request to: {}",
            http::redacted_stations_url(&self.config)?
        );

        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout())
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Received {} bytes", body.len());
        sniff(body)
    }

    async fn transform(&self, payload: Payload) -> Result<TransformResult> {
        let min_count = self.config.min_connectors();

        match payload {
            Payload::FeatureCollection(collection) => {
                let features_in = collection.len();
                Ok(TransformResult::Filtered {
                    source: PayloadKind::FeatureCollection,
                    features_in,
                    collection: self.connector_filter().apply(collection, min_count),
                })
            }
            Payload::Json(value) => {
                tracing::warn!("Received JSON but it is not a FeatureCollection; writing it unfiltered");
                Ok(TransformResult::Passthrough(value))
            }
            Payload::Tabular(text) => {
                let collection = csv_to_feature_collection(&text)
                    .map_err(|e| EtlError::conversion(e.to_string(), &text))?;
                let features_in = collection.len();
                Ok(TransformResult::Filtered {
                    source: PayloadKind::Tabular,
                    features_in,
                    collection: self.connector_filter().apply(collection, min_count),
                })
            }
        }
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        let json = result.to_pretty_json()?;

        self.storage.write_file(output_path, json.as_bytes()).await?;

        tracing::debug!("Output written to {}", output_path);
        Ok(output_path.to_string())
    }
}
