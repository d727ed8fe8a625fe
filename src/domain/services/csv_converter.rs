use crate::domain::model::{Feature, FeatureCollection, Properties, Record};
use crate::domain::services::field_detector::find_key;
use crate::utils::error::Result;
use serde_json::Value;

pub const LATITUDE_CANDIDATES: &[&str] = &["latitude", "lat"];
pub const LONGITUDE_CANDIDATES: &[&str] = &["longitude", "lon", "lng"];

/// Converts header-first CSV text into point features.
///
/// Rows without a detectable or numeric latitude/longitude pair are dropped.
/// Every other column is copied into the feature properties as text, or as
/// `null` when a short row ends before it.
pub fn csv_to_feature_collection(text: &str) -> Result<FeatureCollection> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = 0usize;
    let mut features = Vec::new();

    for row in reader.records() {
        rows += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::trace!("Skipping unreadable CSV row {}: {}", rows, e);
                continue;
            }
        };

        let record = Record::from_row(headers.iter(), row.iter());
        if let Some(feature) = record_to_feature(&record) {
            features.push(feature);
        }
    }

    tracing::debug!(
        "Converted {} CSV rows into {} point features ({} dropped)",
        rows,
        features.len(),
        rows - features.len()
    );

    Ok(FeatureCollection::new(features))
}

/// Builds a point feature from one row, or `None` if it has no usable position.
pub fn record_to_feature(record: &Record) -> Option<Feature> {
    let lat_key = find_key(record.keys(), LATITUDE_CANDIDATES)?;
    let lon_key = find_key(record.keys(), LONGITUDE_CANDIDATES)?;

    let latitude = parse_coordinate(record.get(lat_key)?)?;
    let longitude = parse_coordinate(record.get(lon_key)?)?;

    let properties: Properties = record
        .iter()
        .filter(|(key, _)| *key != lat_key && *key != lon_key)
        .map(|(key, value)| {
            let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
            (key.to_string(), value)
        })
        .collect();

    Some(Feature::point(longitude, latitude, properties))
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Geometry;
    use serde_json::json;

    fn coordinates(feature: &Feature) -> (f64, f64) {
        match feature.geometry {
            Some(Geometry::Point {
                longitude,
                latitude,
            }) => (longitude, latitude),
            ref other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn test_converts_rows_to_lon_lat_points() {
        let csv = "Latitude,Longitude,EV J3400 Connector Count\n47.6,-122.3,2\n47.0,-122.0,0\n";
        let collection = csv_to_feature_collection(csv).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(coordinates(&collection.features[0]), (-122.3, 47.6));
        assert_eq!(coordinates(&collection.features[1]), (-122.0, 47.0));

        let props = &collection.features[0].properties;
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("EV J3400 Connector Count"), Some(&json!("2")));
    }

    #[test]
    fn test_drops_rows_without_usable_coordinates() {
        let csv = "\
Station Name,lat,lng
A,47.1,-122.1
B,,-122.2
C,north,-122.3
D,47.4,
E,47.5,-122.5
";
        let collection = csv_to_feature_collection(csv).unwrap();

        let names: Vec<&Value> = collection
            .features
            .iter()
            .map(|f| &f.properties["Station Name"])
            .collect();
        assert_eq!(names, vec![&json!("A"), &json!("E")]);
    }

    #[test]
    fn test_drops_all_rows_when_geo_columns_are_missing() {
        let csv = "Station Name,City\nA,Seattle\nB,Tacoma\n";
        let collection = csv_to_feature_collection(csv).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let csv = "Latitude,Longitude\nNaN,-122.0\n47.0,inf\n";
        assert!(csv_to_feature_collection(csv).unwrap().is_empty());
    }

    #[test]
    fn test_keeps_other_columns_as_text() {
        let csv = "ID,Station Name,Latitude,Longitude,Zip,EV Level2 EVSE Num\n\
                   7,\"Pike Place, Garage\",47.61, -122.34 ,09801,004\n";
        let collection = csv_to_feature_collection(csv).unwrap();

        assert_eq!(collection.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(coordinates(feature), (-122.34, 47.61));
        assert_eq!(
            serde_json::to_value(&feature.properties).unwrap(),
            json!({
                "ID": "7",
                "Station Name": "Pike Place, Garage",
                "Zip": "09801",
                "EV Level2 EVSE Num": "004"
            })
        );
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let csv = "Latitude,Longitude,Notes\n47.6,-122.3\n47.7\n";
        let collection = csv_to_feature_collection(csv).unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(
            serde_json::to_value(&collection.features[0].properties).unwrap(),
            json!({ "Notes": null })
        );
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(csv_to_feature_collection("").unwrap().is_empty());
        assert!(csv_to_feature_collection("Latitude,Longitude\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_record_to_feature_excludes_geo_keys() {
        let record: Record = vec![("lon", "-122.3"), ("name", "Depot"), ("LAT", "47.6")]
            .into_iter()
            .collect();
        let feature = record_to_feature(&record).unwrap();

        assert_eq!(coordinates(&feature), (-122.3, 47.6));
        assert_eq!(feature.properties.keys().collect::<Vec<_>>(), vec!["name"]);
    }
}
