use crate::domain::model::{FeatureCollection, Payload};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Decides whether `body` is a GeoJSON FeatureCollection, some other JSON
/// document, or tabular text.
///
/// Fails only when the body claims to be a FeatureCollection but its
/// features cannot be read.
pub fn sniff(body: String) -> Result<Payload> {
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => return Ok(Payload::Tabular(body)),
    };

    if !is_feature_collection(&value) {
        return Ok(Payload::Json(value));
    }

    serde_json::from_value::<FeatureCollection>(value)
        .map(Payload::FeatureCollection)
        .map_err(|e| EtlError::conversion(format!("malformed FeatureCollection: {}", e), &body))
}

fn is_feature_collection(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("FeatureCollection")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PayloadKind;
    use serde_json::json;

    #[test]
    fn test_csv_body_is_tabular() {
        let body = "Latitude,Longitude\n47.6,-122.3\n".to_string();
        assert_eq!(sniff(body.clone()).unwrap(), Payload::Tabular(body));
    }

    #[test]
    fn test_feature_collection_is_recognized() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-122.3, 47.6] },
                "properties": { "ev_j3400_connector_count": 2 }
            }]
        })
        .to_string();

        match sniff(body).unwrap() {
            Payload::FeatureCollection(collection) => assert_eq!(collection.len(), 1),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_other_json_passes_through() {
        let body = json!({ "errors": ["state is invalid"] }).to_string();
        let payload = sniff(body).unwrap();
        assert_eq!(payload.kind(), PayloadKind::Json);
        assert_eq!(payload, Payload::Json(json!({ "errors": ["state is invalid"] })));

        assert_eq!(sniff("[1, 2]".to_string()).unwrap().kind(), PayloadKind::Json);
    }

    #[test]
    fn test_null_features_is_an_empty_collection() {
        let body = r#"{"type":"FeatureCollection","features":null}"#.to_string();
        assert_eq!(
            sniff(body).unwrap(),
            Payload::FeatureCollection(FeatureCollection::empty())
        );
    }

    #[test]
    fn test_received_geometry_survives_sniff_and_serialize() {
        let body = r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[-122,47],"bbox":[1,2,3,4]},"properties":{"ev_j3400_connector_count":1}}]}"#;

        let collection = match sniff(body.to_string()).unwrap() {
            Payload::FeatureCollection(collection) => collection,
            other => panic!("unexpected payload: {:?}", other),
        };

        let written = serde_json::to_string(&collection).unwrap();
        assert_eq!(written, body);
    }

    #[test]
    fn test_malformed_feature_collection_is_a_conversion_error() {
        let body = json!({ "type": "FeatureCollection", "features": [1, 2] }).to_string();
        assert!(matches!(sniff(body), Err(EtlError::ConversionError { .. })));
    }
}
