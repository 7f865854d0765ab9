//! Feature decoding.
//!
//! The store hands raw response bodies to a [`FeatureCodec`]; [`GeoJsonCodec`]
//! covers the JSON encodings OGC API - Features servers return by default.

use serde_json::Value;

use ogc_common::{OgcError, OgcResult};
use ogcapi_protocol::{Feature, GeoJson};

/// Input of [`FeatureCodec::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeRequest {
    /// Response body, after CRS84 URI rewriting.
    pub content: String,
    pub content_type: String,
    /// CRS the server says the content is in.
    pub content_crs: Option<String>,
    pub content_length: Option<u64>,
    /// Canonical short name of `content_crs`.
    pub reference: String,
}

/// Decoded features, consumed in order.
#[derive(Debug, Clone)]
pub struct FeatureCursor {
    reference: String,
    features: std::vec::IntoIter<Feature>,
}

impl FeatureCursor {
    pub fn new(features: Vec<Feature>, reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            features: features.into_iter(),
        }
    }

    pub fn empty(reference: impl Into<String>) -> Self {
        Self::new(Vec::new(), reference)
    }

    /// Reference the feature geometries are expressed in.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn has_next(&self) -> bool {
        self.features.len() > 0
    }

    pub fn remaining(&self) -> usize {
        self.features.len()
    }
}

impl Iterator for FeatureCursor {
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        self.features.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.features.size_hint()
    }
}

/// Turns a response body into features.
pub trait FeatureCodec: Send + Sync {
    fn decode(&self, request: DecodeRequest) -> OgcResult<FeatureCursor>;
}

/// Decoder for GeoJSON `FeatureCollection` and `Feature` bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonCodec;

impl GeoJsonCodec {
    fn accepts(content_type: &str) -> bool {
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        media_type.ends_with("json") || media_type.ends_with("+json") || media_type == "text/plain"
    }
}

impl FeatureCodec for GeoJsonCodec {
    fn decode(&self, request: DecodeRequest) -> OgcResult<FeatureCursor> {
        if !Self::accepts(&request.content_type) {
            return Err(OgcError::Decode(format!(
                "Unsupported content type: {}",
                request.content_type
            )));
        }

        let value: Value = serde_json::from_str(&request.content)
            .map_err(|e| OgcError::Decode(format!("Invalid GeoJSON: {}", e)))?;
        let document =
            GeoJson::from_value(value).map_err(|e| OgcError::Decode(format!("Invalid GeoJSON: {}", e)))?;

        Ok(FeatureCursor::new(document.into_features(), request.reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str, content_type: &str) -> DecodeRequest {
        DecodeRequest {
            content: content.to_string(),
            content_type: content_type.to_string(),
            content_crs: None,
            content_length: None,
            reference: "CRS:84".to_string(),
        }
    }

    #[test]
    fn test_decode_collection() {
        let body = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "id": 1, "geometry": null, "properties": {}},
            {"type": "Feature", "id": 2, "geometry": null, "properties": {}}
        ]}"#;
        let mut cursor = GeoJsonCodec
            .decode(request(body, "application/geo+json"))
            .unwrap();
        assert_eq!(cursor.reference(), "CRS:84");
        assert_eq!(cursor.remaining(), 2);
        assert!(cursor.next().is_some());
        assert!(cursor.has_next());
        assert!(cursor.next().is_some());
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_decode_single_feature() {
        let body = r#"{"type": "Feature", "id": "a", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {}}"#;
        let cursor = GeoJsonCodec
            .decode(request(body, "application/json; charset=utf-8"))
            .unwrap();
        assert_eq!(cursor.count(), 1);
    }

    #[test]
    fn test_decode_errors() {
        let err = GeoJsonCodec.decode(request("<gml/>", "application/gml+xml")).unwrap_err();
        assert!(matches!(err, OgcError::Decode(_)));

        let err = GeoJsonCodec.decode(request("{not json", "application/json")).unwrap_err();
        assert!(err.to_string().starts_with("Decode error: Invalid GeoJSON"));
    }
}
