use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Feature properties, kept in the order they were received.
pub type Properties = serde_json::Map<String, Value>;

/// One CSV row: column name to raw text, in header order. Columns past the
/// end of a short row hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn from_row<'a, H, C>(headers: H, cells: C) -> Self
    where
        H: IntoIterator<Item = &'a str>,
        C: IntoIterator<Item = &'a str>,
    {
        let mut cells = cells.into_iter();
        Self {
            fields: headers
                .into_iter()
                .map(|header| (header.to_string(), cells.next().map(str::to_string)))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

/// Feature geometry. Points built from CSV rows are typed; geometry received
/// from the API is kept exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Geometry {
    Point { longitude: f64, latitude: f64 },
    Raw(Value),
}

impl From<Value> for Geometry {
    fn from(value: Value) -> Self {
        Geometry::Raw(value)
    }
}

impl From<Geometry> for Value {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            // GeoJSON positions are [longitude, latitude]
            Geometry::Point {
                longitude,
                latitude,
            } => json!({ "type": "Point", "coordinates": [longitude, latitude] }),
            Geometry::Raw(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: FeatureType,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,
    /// Members such as `id` or `bbox`, written back out unchanged.
    #[serde(flatten)]
    pub foreign_members: Properties,
}

impl Feature {
    pub fn point(longitude: f64, latitude: f64, properties: Properties) -> Self {
        Self {
            kind: FeatureType::Feature,
            geometry: Some(Geometry::Point {
                longitude,
                latitude,
            }),
            properties,
            foreign_members: Properties::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: FeatureCollectionType::FeatureCollection,
            features,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A response body after sniffing its content.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    FeatureCollection(FeatureCollection),
    Json(Value),
    Tabular(String),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::FeatureCollection(_) => PayloadKind::FeatureCollection,
            Payload::Json(_) => PayloadKind::Json,
            Payload::Tabular(_) => PayloadKind::Tabular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    FeatureCollection,
    Json,
    Tabular,
}

/// What the transform step hands to the load step.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResult {
    Filtered {
        source: PayloadKind,
        features_in: usize,
        collection: FeatureCollection,
    },
    Passthrough(Value),
}

impl TransformResult {
    /// Two-space indented JSON with non-ASCII text left as is.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        match self {
            TransformResult::Filtered { collection, .. } => serde_json::to_string_pretty(collection),
            TransformResult::Passthrough(value) => serde_json::to_string_pretty(value),
        }
    }
}

/// Outcome of one complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub source: PayloadKind,
    pub features_in: Option<usize>,
    pub features_out: Option<usize>,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts = format!(
            "Features: {} -> {} (filtered)",
            self.features_in.unwrap_or(0),
            self.features_out.unwrap_or(0)
        );
        match self.source {
            PayloadKind::FeatureCollection => write!(
                f,
                "GeoJSON saved successfully as '{}'. {}",
                self.output_path, counts
            ),
            PayloadKind::Tabular => write!(
                f,
                "Converted CSV -> GeoJSON and saved to '{}'. {}",
                self.output_path, counts
            ),
            PayloadKind::Json => write!(
                f,
                "Received JSON but it is not a FeatureCollection. Saved raw JSON to '{}'.",
                self.output_path
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_feature_serializes_lon_lat() {
        let mut props = Properties::new();
        props.insert("Station Name".to_string(), json!("Café Plug"));
        let feature = Feature::point(-122.3, 47.6, props);

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-122.3, 47.6] },
                "properties": { "Station Name": "Café Plug" }
            })
        );
    }

    #[test]
    fn test_feature_keeps_foreign_members_and_raw_geometry() {
        let raw = json!({
            "type": "Feature",
            "id": 42,
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
            "properties": { "b": 1, "a": "2" }
        });

        let feature: Feature = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(feature.geometry, Some(Geometry::Raw(_))));
        assert_eq!(feature.foreign_members.get("id"), Some(&json!(42)));
        let keys: Vec<&String> = feature.properties.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);

        assert_eq!(serde_json::to_value(&feature).unwrap(), raw);
    }

    #[test]
    fn test_feature_with_null_geometry_and_properties() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": null,
            "properties": null
        }))
        .unwrap();

        assert!(feature.geometry.is_none());
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn test_received_point_geometry_is_written_back_unchanged() {
        let raw = json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [-122, 47],
                "bbox": [1, 2, 3, 4]
            },
            "properties": { "ev_j3400_connector_count": 2 }
        });

        let feature: Feature = serde_json::from_value(raw.clone()).unwrap();
        let written = serde_json::to_string(&feature).unwrap();

        assert!(written.contains("\"coordinates\":[-122,47]"));
        assert_eq!(serde_json::to_value(&feature).unwrap(), raw);
    }

    #[test]
    fn test_collection_without_features_is_empty() {
        let collection: FeatureCollection =
            serde_json::from_value(json!({ "type": "FeatureCollection" })).unwrap();
        assert!(collection.is_empty());

        let collection: FeatureCollection =
            serde_json::from_value(json!({ "type": "FeatureCollection", "features": null }))
                .unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_record_preserves_column_order() {
        let record: Record = vec![("Zip", "98101"), ("Latitude", "47.6"), ("City", "Seattle")]
            .into_iter()
            .collect();

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Zip", "Latitude", "City"]);
        assert_eq!(record.get("City"), Some("Seattle"));
        assert_eq!(record.get("city"), None);
    }

    #[test]
    fn test_record_from_short_row_marks_missing_columns() {
        let record = Record::from_row(["Latitude", "Longitude", "Notes"], ["47.6", "-122.3"]);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("Notes"), None);
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![
                ("Latitude", Some("47.6")),
                ("Longitude", Some("-122.3")),
                ("Notes", None)
            ]
        );
    }
}
