pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::StationPipeline};
pub use domain::model::{Feature, FeatureCollection, RunSummary};
pub use domain::services::{csv_to_feature_collection, filter_by_connector_count, find_key};
pub use utils::error::{EtlError, Result};
