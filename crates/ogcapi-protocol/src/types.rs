//! Core document types shared across OGC API resources.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use ogc_common::crs::CRS84_URI;
use ogc_common::BoundingBox;

/// A hyperlink to a related resource.
///
/// `href` may be relative; resolved copies are produced with
/// [`Link::resolved`] and the original is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "data", "items").
    #[serde(default)]
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Whether the link is a URI template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,

    /// The language of the linked resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            ..Self::default()
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Declared media type, if any.
    pub fn media_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    /// Copy of this link with `href` passed through `complete`.
    pub fn resolved(&self, complete: impl Fn(&str) -> String) -> Self {
        Self {
            href: complete(&self.href),
            ..self.clone()
        }
    }
}

/// Read a `links` member, skipping entries that are not valid link objects.
///
/// Anything other than an array yields no links.
pub fn lenient_links(value: Option<&Value>) -> Vec<Link> {
    value
        .and_then(Value::as_array)
        .map(|links| {
            links
                .iter()
                .filter_map(|link| Link::deserialize(link).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve every link of a list.
pub fn resolve_links(links: &[Link], complete: impl Fn(&str) -> String) -> Vec<Link> {
    links.iter().map(|link| link.resolved(&complete)).collect()
}

/// The spatial and temporal extent of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Extent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial: Option<SpatialExtent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,
}

impl Extent {
    /// First spatial bounding box, which covers the whole collection.
    pub fn first_bbox(&self) -> Option<BoundingBox> {
        self.spatial
            .as_ref()
            .and_then(|spatial| spatial.bbox.first())
            .and_then(|values| BoundingBox::from_slice(values))
    }
}

/// Spatial extent with bounding boxes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes as [west, south, east, north] arrays (or 6 values in 3D).
    /// The first box covers everything; further boxes refine it. A single
    /// flat array is read as one box.
    #[serde(default, deserialize_with = "one_or_many_boxes")]
    pub bbox: Vec<Vec<f64>>,

    /// Coordinate reference system of the boxes (default: CRS84).
    #[serde(default = "default_crs")]
    pub crs: String,
}

fn default_crs() -> String {
    CRS84_URI.to_string()
}

fn one_or_many_boxes<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Boxes {
        Many(Vec<Vec<f64>>),
        One(Vec<f64>),
    }

    Ok(match Boxes::deserialize(deserializer)? {
        Boxes::Many(boxes) => boxes,
        Boxes::One(single) => vec![single],
    })
}

/// Temporal extent with time intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Time intervals as [start, end] pairs (ISO 8601); null means open-ended.
    #[serde(default)]
    pub interval: Vec<Vec<Option<String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trs: Option<String>,
}
