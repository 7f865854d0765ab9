//! Service-level documents: landing page, API description and the tile
//! matrix set catalog.
//!
//! Parsing is lenient where servers commonly deviate (missing link fields,
//! extra members) and strict only on the members discovery depends on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ogc_common::{OgcError, OgcResult, TileMatrixSet};

use crate::media_types;
use crate::types::{lenient_links, Link};

/// Landing page of an OGC API service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub links: Vec<Link>,
}

impl LandingPage {
    /// Read a landing page from a parsed JSON body.
    ///
    /// The `links` member must be an array. Entries that are not valid link
    /// objects are skipped.
    pub fn from_value(value: &Value) -> OgcResult<Self> {
        let links = value.get("links").filter(|links| links.is_array());
        if links.is_none() {
            return Err(OgcError::MissingLinksProperty);
        }
        let links = lenient_links(links);

        Ok(Self {
            title: value.get("title").and_then(Value::as_str).map(str::to_string),
            description: value
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            links,
        })
    }

    /// The collections link: `rel=data` in JSON, else the first `rel=data`.
    pub fn data_link(&self) -> OgcResult<&Link> {
        self.links
            .iter()
            .find(|link| link.rel == "data" && link.media_type() == Some(media_types::JSON))
            .or_else(|| self.links.iter().find(|link| link.rel == "data"))
            .ok_or(OgcError::NoDataLink)
    }

    /// The OpenAPI description link, if the service publishes one in JSON.
    pub fn api_description_link(&self) -> Option<&Link> {
        self.links.iter().find(|link| {
            (link.rel == "service-desc" || link.rel == "service")
                && link
                    .media_type()
                    .map_or(false, |t| t.contains("openapi+json"))
        })
    }
}

/// The parts of an OpenAPI document used by clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiDescription {
    /// OpenAPI version, empty when not declared.
    #[serde(default)]
    pub openapi: String,

    #[serde(default = "empty_object")]
    pub info: Value,
}

impl Default for ApiDescription {
    fn default() -> Self {
        Self {
            openapi: String::new(),
            info: empty_object(),
        }
    }
}

impl ApiDescription {
    pub fn from_value(value: &Value) -> Self {
        Self {
            openapi: value
                .get("openapi")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            info: value.get("info").cloned().unwrap_or_else(empty_object),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Reference to a tile matrix set in the catalog; carries no geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileMatrixSetMeta {
    /// Empty when the catalog entry carries no id.
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub links: Vec<Link>,
}

impl TileMatrixSetMeta {
    /// Read one catalog entry. Malformed links are dropped; returns `None`
    /// when the entry is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            id: text("id").unwrap_or_default(),
            title: text("title"),
            links: lenient_links(object.get("links")),
        })
    }

    /// The link to the JSON definition, else the first link.
    pub fn json_link(&self) -> Option<&Link> {
        self.links
            .iter()
            .find(|link| link.media_type() == Some(media_types::JSON))
            .or_else(|| self.links.first())
    }
}

/// The `/tileMatrixSets` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TileMatrixSetCatalog {
    pub tile_matrix_sets: Vec<TileMatrixSetMeta>,
}

impl TileMatrixSetCatalog {
    /// Fails only when `tileMatrixSets` is not an array; entries that are
    /// not objects are skipped.
    pub fn from_value(value: &Value) -> OgcResult<Self> {
        let entries = value
            .get("tileMatrixSets")
            .and_then(Value::as_array)
            .ok_or(OgcError::InvalidTileMatrixSetCatalog)?;

        Ok(Self {
            tile_matrix_sets: entries
                .iter()
                .filter_map(TileMatrixSetMeta::from_value)
                .collect(),
        })
    }
}

/// Validate and read a tile matrix set definition.
///
/// `id`, `tileMatrices` and `crs` must be present.
pub fn parse_tile_matrix_set(value: &Value) -> OgcResult<TileMatrixSet> {
    let complete = ["id", "tileMatrices", "crs"]
        .iter()
        .all(|member| value.get(member).map_or(false, |v| !v.is_null()));
    if !complete {
        return Err(OgcError::InvalidTileMatrixSetGeometry);
    }
    serde_json::from_value(value.clone()).map_err(|_| OgcError::InvalidTileMatrixSetGeometry)
}
