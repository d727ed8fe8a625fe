use crate::domain::model::{Feature, FeatureCollection};
use crate::domain::services::field_detector::find_key;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Substring identifying the J3400 (NACS) connector count column.
pub const DEFAULT_CONNECTOR_PATTERN: &str = "j3400";

/// Where the connector count property name is looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyDetection {
    /// Only the first feature's properties are inspected; the key found there
    /// is applied to every feature.
    #[default]
    FirstFeature,
    /// Features are inspected in order until one carries a matching key.
    AnyFeature,
}

impl FromStr for KeyDetection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "first-feature" => Ok(KeyDetection::FirstFeature),
            "any-feature" => Ok(KeyDetection::AnyFeature),
            other => Err(format!(
                "unknown key detection '{other}' (expected first-feature or any-feature)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorFilter {
    pattern: String,
    detection: KeyDetection,
}

impl Default for ConnectorFilter {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTOR_PATTERN)
    }
}

impl ConnectorFilter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            detection: KeyDetection::default(),
        }
    }

    pub fn with_detection(mut self, detection: KeyDetection) -> Self {
        self.detection = detection;
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Finds the property name holding the connector count.
    pub fn detect_key<'a>(&self, collection: &'a FeatureCollection) -> Option<&'a str> {
        let candidates = [self.pattern.as_str()];
        let key_in = |feature: &'a Feature| {
            find_key(feature.properties.keys().map(String::as_str), &candidates)
        };

        match self.detection {
            KeyDetection::FirstFeature => collection.features.first().and_then(key_in),
            KeyDetection::AnyFeature => collection.features.iter().find_map(key_in),
        }
    }

    /// Retains features whose connector count is at least `min_count`.
    pub fn apply(&self, collection: FeatureCollection, min_count: i64) -> FeatureCollection {
        if collection.is_empty() {
            return FeatureCollection::empty();
        }

        let Some(key) = self.detect_key(&collection).map(str::to_owned) else {
            tracing::warn!(
                "Could not find a '{}' connector count property in features; returning empty collection",
                self.pattern
            );
            return FeatureCollection::empty();
        };
        tracing::debug!("Using '{}' as the connector count property", key);

        let features = collection
            .features
            .into_iter()
            .filter(|feature| connector_count(feature.properties.get(&key)) >= min_count)
            .collect();

        FeatureCollection::new(features)
    }
}

/// Filters with the default J3400 pattern and first-feature key detection.
pub fn filter_by_connector_count(collection: FeatureCollection, min_count: i64) -> FeatureCollection {
    ConnectorFilter::default().apply(collection, min_count)
}

/// Reads a count property leniently: missing, empty or unparseable values
/// count as zero and fractional values are truncated toward zero.
pub fn connector_count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(truncate)
            .unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

fn truncate(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}
