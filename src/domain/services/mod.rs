// Pure services: column detection, CSV conversion, payload sniffing and the connector filter.

pub mod connector_filter;
pub mod csv_converter;
pub mod field_detector;
pub mod payload;

pub use connector_filter::{filter_by_connector_count, ConnectorFilter, KeyDetection};
pub use csv_converter::csv_to_feature_collection;
pub use field_detector::find_key;
pub use payload::sniff;
