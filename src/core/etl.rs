use crate::core::{Pipeline, RunSummary, TransformResult};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting ETL process...");

        // Extract
        let payload = self.pipeline.extract().await?;
        let source = payload.kind();
        tracing::info!("Extracted {:?} payload", source);

        // Transform
        let result = self.pipeline.transform(payload).await?;
        let (features_in, features_out) = match &result {
            TransformResult::Filtered {
                features_in,
                collection,
                ..
            } => (Some(*features_in), Some(collection.len())),
            TransformResult::Passthrough(_) => (None, None),
        };
        if let (Some(before), Some(after)) = (features_in, features_out) {
            tracing::info!("Features: {} -> {} (filtered)", before, after);
        }

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            source,
            features_in,
            features_out,
        })
    }
}
