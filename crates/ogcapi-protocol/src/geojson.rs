//! GeoJSON types for OGC API - Features responses.
//!
//! Item endpoints return either a `FeatureCollection` (with paging members
//! and links) or a single `Feature`.
//!
//! See: <https://docs.ogc.org/is/17-069r4/17-069r4.html#_response_6>

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::types::Link;

/// A GeoJSON FeatureCollection with the OGC API paging members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default)]
    pub features: Vec<Feature>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_matched: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_returned: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl FeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
            number_matched: None,
            number_returned: None,
            links: Vec::new(),
        }
    }

    /// Add a feature to the collection.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// The `rel=next` paging link, if any.
    pub fn next_link(&self) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == "next")
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// Feature identifier; servers use both strings and numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeatureId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Number(n) => write!(f, "{}", n),
            FeatureId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,

    /// Geometry; `null` for features without one (e.g. `skipGeometry=true`).
    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Create a feature with a geometry and no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            type_: "Feature".to_string(),
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }

    /// Set the feature ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(FeatureId::Text(id.into()));
        self
    }

    /// Look up a property value.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(name))
    }
}

/// A position: `[x, y]` or `[x, y, z]`.
pub type Position = Vec<f64>;

/// GeoJSON geometry types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    /// Linear rings; the first is the exterior.
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Create a point geometry.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point {
            coordinates: vec![x, y],
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }
}

/// A decoded items response.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    FeatureCollection(FeatureCollection),
    Feature(Feature),
}

impl GeoJson {
    /// Decode by the top-level `type` member.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        match value.get("type").and_then(Value::as_str) {
            Some("Feature") => serde_json::from_value(value).map(GeoJson::Feature),
            _ => serde_json::from_value(value).map(GeoJson::FeatureCollection),
        }
    }

    pub fn into_features(self) -> Vec<Feature> {
        match self {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_collection_deserialization() {
        let value = json!({
            "type": "FeatureCollection",
            "numberMatched": 10,
            "numberReturned": 1,
            "features": [{
                "type": "Feature",
                "id": 7,
                "geometry": {"type": "Point", "coordinates": [5.0, 52.0]},
                "properties": {"name": "Mill"}
            }],
            "links": [{"rel": "next", "href": "/items?offset=1"}]
        });
        let collection: FeatureCollection = serde_json::from_value(value).unwrap();
        assert_eq!(collection.number_matched, Some(10));
        assert_eq!(collection.features[0].id.as_ref().unwrap().to_string(), "7");
        assert_eq!(collection.features[0].property("name"), Some(&json!("Mill")));
        assert_eq!(collection.next_link().unwrap().href, "/items?offset=1");
    }

    #[test]
    fn test_null_geometry() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "id": "a",
            "geometry": null,
            "properties": {}
        }))
        .unwrap();
        assert!(feature.geometry.is_none());
        assert_eq!(feature.id, Some(FeatureId::Text("a".to_string())));
    }

    #[test]
    fn test_geometry_types() {
        let polygon: Geometry = serde_json::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
        }))
        .unwrap();
        assert_eq!(polygon.type_name(), "Polygon");

        let multi: Geometry = serde_json::from_value(json!({
            "type": "MultiPoint",
            "coordinates": [[0.0, 0.0, 10.0], [1.0, 1.0, 12.0]]
        }))
        .unwrap();
        assert_eq!(multi.type_name(), "MultiPoint");
    }

    #[test]
    fn test_geojson_dispatch() {
        let single = GeoJson::from_value(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
            "properties": null
        }))
        .unwrap();
        assert!(matches!(single, GeoJson::Feature(_)));
        assert_eq!(single.into_features().len(), 1);

        let many = GeoJson::from_value(json!({"type": "FeatureCollection", "features": []})).unwrap();
        assert!(many.into_features().is_empty());
    }

    #[test]
    fn test_feature_serialization() {
        let feature = Feature::new(Geometry::point(1.0, 2.0)).with_id("x");
        let json = serde_json::to_value(&feature).unwrap();
        assert_eq!(json["type"], "Feature");
        assert_eq!(json["id"], "x");
        assert_eq!(json["geometry"]["type"], "Point");
    }
}
