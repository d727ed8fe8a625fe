pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{
    Feature, FeatureCollection, Payload, PayloadKind, RunSummary, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ResponseFormat, Storage};
pub use crate::domain::services::connector_filter::KeyDetection;
pub use crate::utils::error::Result;
